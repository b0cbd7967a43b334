pub mod assignment;
pub mod normalize;
pub mod phonetic;
pub mod scorer;
pub mod segmenter;
