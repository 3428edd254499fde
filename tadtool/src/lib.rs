#[cfg(feature = "core")]
#[doc(inline)]
pub use tadtool_core as core;

#[cfg(feature = "io")]
#[doc(inline)]
pub use tadtool_io as io;

#[cfg(feature = "index")]
#[doc(inline)]
pub use tadtool_index as index;
