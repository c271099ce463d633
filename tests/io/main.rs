// File splitting and fragment reader tests
mod fragment;
#[cfg(feature = "glob")]
mod glob;
mod plan;
mod split;
