/// User interface components
///
/// - `product.rs` - the Product page over the responsive background
/// - `split_with_image.rs` - two-column feature block
/// - `subscriptions.rs` - subscriptions table bound to the cache
/// - `images.rs` - remote icons and feature images

pub mod images;
pub mod product;
pub mod split_with_image;
pub mod subscriptions;
