pub mod credential;
pub mod engine;
pub mod options;
pub mod region;
pub mod replay;
pub mod vendor;

pub use credential::{ApiCredentials, CachedToken, TokenGrant};
pub use engine::{OcrEngine, OcrError, OcrInput, OcrOutput};
pub use options::{
    AccurateOptions, DocAnalysisOptions, GeneralOptions, HandwritingOptions, OcrOptions, PaperCutOptions,
    RecognitionMode,
};
pub use region::{BoundingBox, PaperQuestion, TextFragment};
pub use replay::ReplayOcrEngine;
pub use vendor::{parse_response, VendorResponse};
