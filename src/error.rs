use thiserror::Error;

#[derive(Debug, Error)]
pub enum PalettizeError {
    #[error("image has a zero dimension ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error(
        "working image {width}x{height} is too small to sample; \
         both dimensions must be at least 2 after resizing"
    )]
    DegenerateImage { width: u32, height: u32 },
}
