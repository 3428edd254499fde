use std::fs::{read_to_string, write};
use std::path::Path;

use ndarray::array;
use rstest::*;
use tempfile::tempdir;

use tadtool::core::models::{ContactMatrix, GenomicRegion, RegionSet};
use tadtool::core::subset::{extract_sparse_submatrix, extract_submatrix};
use tadtool::core::TadError;
use tadtool::index::{
    IndexAlgorithm, IndexArray, IndexConfig, TadToolConfig, call_tads, compute_data_array,
};
use tadtool::io::{load_matrix, read_sparse_edges, write_tads};

#[fixture]
fn path_to_regions() -> &'static str {
    "../tests/data/regions.bed"
}

#[fixture]
fn path_to_dense_matrix() -> &'static str {
    "../tests/data/matrix_dense.txt"
}

#[fixture]
fn path_to_sparse_matrix() -> &'static str {
    "../tests/data/matrix_sparse.txt"
}

#[fixture]
fn path_to_config() -> &'static str {
    "../tests/data/tadtool.toml"
}

fn load(regions: &str, matrix: &str) -> (RegionSet, ContactMatrix) {
    let regions = RegionSet::try_from(regions).unwrap();
    let data = load_matrix(
        Path::new(matrix),
        regions.len(),
        regions.index_converter.as_ref(),
        true,
    )
    .unwrap();
    (regions, ContactMatrix::masked(data).unwrap())
}

fn spans(tads: &[GenomicRegion]) -> Vec<String> {
    tads.iter().map(|t| t.to_string()).collect()
}

mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[rstest]
    fn test_sparse_and_dense_load_identically(
        path_to_regions: &str,
        path_to_dense_matrix: &str,
        path_to_sparse_matrix: &str,
    ) {
        let (_, dense) = load(path_to_regions, path_to_dense_matrix);
        let (_, sparse) = load(path_to_regions, path_to_sparse_matrix);

        assert_eq!(dense.view(), sparse.view());
    }

    #[rstest]
    fn test_sparse_edge_list_example() {
        let tempdir = tempdir().unwrap();
        let regions_path = tempdir.path().join("regions.bed");
        let matrix_path = tempdir.path().join("edges.txt");
        write(&regions_path, "chr1\t0\t100\nchr1\t100\t200\nchr1\t200\t300\n").unwrap();
        write(&matrix_path, "0\t1\t5.0\n1\t2\t3.0\n").unwrap();

        let regions = RegionSet::try_from(regions_path.as_path()).unwrap();
        let matrix = load_matrix(&matrix_path, regions.len(), None, true).unwrap();

        assert_eq!(
            matrix,
            array![[0.0, 5.0, 0.0], [5.0, 0.0, 3.0], [0.0, 3.0, 0.0]]
        );
    }

    #[rstest]
    fn test_sparse_edges_by_name(path_to_regions: &str) {
        let tempdir = tempdir().unwrap();
        let matrix_path = tempdir.path().join("named.txt");
        write(&matrix_path, "bin0\tbin1\t2.0\nbin1\tbin0\t1.0\n").unwrap();

        let regions = RegionSet::try_from(path_to_regions).unwrap();
        let matrix = load_matrix(
            &matrix_path,
            regions.len(),
            regions.index_converter.as_ref(),
            true,
        )
        .unwrap();

        // both directions accumulate into the same symmetric cell
        assert_eq!(matrix[[0, 1]], 3.0);
        assert_eq!(matrix[[1, 0]], 3.0);

        write(&matrix_path, "bin0\tbin42\t2.0\n").unwrap();
        let result = load_matrix(
            &matrix_path,
            regions.len(),
            regions.index_converter.as_ref(),
            true,
        );
        assert!(matches!(result, Err(TadError::Lookup(_))));
    }

    #[rstest]
    fn test_region_count_mismatch(path_to_dense_matrix: &str) {
        let result = load_matrix(Path::new(path_to_dense_matrix), 8, None, true);
        assert!(matches!(result, Err(TadError::Dimension(_))));
    }

    #[rstest]
    fn test_insulation_tads(path_to_regions: &str, path_to_dense_matrix: &str) {
        let (regions, matrix) = load(path_to_regions, path_to_dense_matrix);

        let array = compute_data_array(
            &matrix,
            &regions.regions,
            IndexAlgorithm::Insulation,
            &[100, 200],
            &IndexConfig::default(),
        )
        .unwrap();
        assert_eq!(array.data().dim(), (2, regions.len()));

        let curve = array.require_curve(100).unwrap();
        let tads = call_tads(IndexAlgorithm::Insulation, &curve, 5.0, &regions.regions).unwrap();

        assert_eq!(spans(&tads), vec!["chr1:1-300", "chr1:301-600", "chr2:1-400"]);
    }

    #[rstest]
    fn test_directionality_tads(path_to_regions: &str, path_to_sparse_matrix: &str) {
        let (regions, matrix) = load(path_to_regions, path_to_sparse_matrix);

        let array = compute_data_array(
            &matrix,
            &regions.regions,
            IndexAlgorithm::Directionality,
            &[200],
            &IndexConfig::default(),
        )
        .unwrap();

        let curve = array.require_curve(200).unwrap();
        assert!(curve[2] < -1.0);
        assert!(curve[3] > 1.0);

        let tads =
            call_tads(IndexAlgorithm::Directionality, &curve, 1.0, &regions.regions).unwrap();
        assert_eq!(spans(&tads), vec!["chr1:1-300", "chr1:301-600", "chr2:1-400"]);
    }

    #[rstest]
    fn test_tads_from_saved_index_array(path_to_regions: &str, path_to_dense_matrix: &str) {
        let (regions, matrix) = load(path_to_regions, path_to_dense_matrix);
        let tempdir = tempdir().unwrap();
        let npy = tempdir.path().join("ii.npy");

        let array = compute_data_array(
            &matrix,
            &regions.regions,
            IndexAlgorithm::Insulation,
            &[100],
            &IndexConfig::default(),
        )
        .unwrap();
        array.write_npy(&npy).unwrap();

        let reloaded = IndexArray::read_npy(&npy, regions.len()).unwrap();
        assert_eq!(reloaded.window_sizes(), &[100]);

        let expected = call_tads(
            IndexAlgorithm::Insulation,
            &array.require_curve(100).unwrap(),
            5.0,
            &regions.regions,
        )
        .unwrap();
        let tads = call_tads(
            IndexAlgorithm::Insulation,
            &reloaded.require_curve(100).unwrap(),
            5.0,
            &regions.regions,
        )
        .unwrap();
        assert_eq!(tads, expected);

        let out = tempdir.path().join("tads.bed");
        write_tads(&out, &tads).unwrap();
        assert_eq!(
            read_to_string(&out).unwrap(),
            "chr1\t0\t300\nchr1\t300\t600\nchr2\t0\t400\n"
        );
    }

    #[rstest]
    fn test_index_array_shape_is_checked(path_to_regions: &str) {
        let regions = RegionSet::try_from(path_to_regions).unwrap();
        let result = IndexArray::new(ndarray::Array2::zeros((2, 9)), vec![100, 200], regions.len());
        assert!(matches!(result, Err(TadError::Dimension(_))));
    }

    #[rstest]
    fn test_config_drives_computation(
        path_to_regions: &str,
        path_to_dense_matrix: &str,
        path_to_config: &str,
    ) {
        let (regions, matrix) = load(path_to_regions, path_to_dense_matrix);
        let config = TadToolConfig::try_from(Path::new(path_to_config)).unwrap();

        let algorithm = config.algorithm.unwrap();
        let window_sizes = config.window_sizes.clone().unwrap();
        let array = compute_data_array(
            &matrix,
            &regions.regions,
            algorithm,
            &window_sizes,
            &config.index,
        )
        .unwrap();

        assert_eq!(array.window_sizes(), window_sizes.as_slice());
        for row in array.data().rows() {
            assert_eq!(row.len(), regions.len());
        }
    }

    #[rstest]
    fn test_subset_to_full_extent_is_identity(
        path_to_regions: &str,
        path_to_dense_matrix: &str,
        path_to_sparse_matrix: &str,
    ) {
        let (regions, matrix) = load(path_to_regions, path_to_dense_matrix);
        let target: GenomicRegion = "chr1:1-600".parse().unwrap();

        let (subset, start, end) = regions.subset(&target).unwrap();
        assert_eq!((start, end), (0, 5));
        assert_eq!(subset.regions, regions.regions[..6].to_vec());

        let submatrix = extract_submatrix(&matrix.clone().into_inner(), start, end).unwrap();
        assert_eq!(submatrix.view(), matrix.view().slice(ndarray::s![..6, ..6]));

        let edges = read_sparse_edges(Path::new(path_to_sparse_matrix), regions.len(), None).unwrap();
        let kept = extract_sparse_submatrix(&edges, 6, 9);
        assert!(kept.iter().all(|e| e.row <= 3 && e.col <= 3));
        assert_eq!(kept.len(), 10);
    }

    #[rstest]
    fn test_subset_example() {
        let regions: Vec<GenomicRegion> = (0..5)
            .map(|i| GenomicRegion::new("chr1", i * 100 + 1, (i + 1) * 100).unwrap())
            .collect();
        let regions = RegionSet::from(regions);
        let target: GenomicRegion = "chr1:150-350".parse().unwrap();

        let (subset, start, end) = regions.subset(&target).unwrap();
        assert_eq!((start, end), (1, 3));
        assert_eq!(subset.len(), 3);

        let matrix = ndarray::Array2::from_shape_fn((5, 5), |(i, j)| (i * 5 + j) as f64);
        let submatrix = extract_submatrix(&matrix, start, end).unwrap();
        assert_eq!(
            submatrix,
            array![[6.0, 7.0, 8.0], [11.0, 12.0, 13.0], [16.0, 17.0, 18.0]]
        );

        let miss: GenomicRegion = "chr3:1-100".parse().unwrap();
        assert!(matches!(regions.subset(&miss), Err(TadError::Range(_))));
    }
}
