#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use powiter_kernels as kernels;

#[doc(inline)]
pub use powiter_operator as operator;

#[doc(inline)]
pub use powiter_eigen as eigen;
