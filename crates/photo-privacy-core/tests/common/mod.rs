pub mod exif_fixture;
pub mod test_images;

#[allow(unused_imports)]
pub use exif_fixture::*;
#[allow(unused_imports)]
pub use test_images::*;
