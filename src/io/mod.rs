//! File-level I/O: bounded fragment readers and line-aligned splitting.

pub mod fragment;
pub mod split;

#[cfg_attr(docsrs, doc(cfg(feature = "glob")))]
#[cfg(feature = "glob")]
pub mod glob;

#[cfg_attr(docsrs, doc(cfg(feature = "parallel-io")))]
#[cfg(feature = "parallel-io")]
pub mod par;
