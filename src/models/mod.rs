pub mod nearest_centroid;

pub use nearest_centroid::NearestCentroid;
