pub mod assessment;
pub mod measurement;
pub mod profile;
pub mod record;

pub use assessment::{Assessment, BmiCategory, HealthyRange};
pub use measurement::{HeightInput, Measurement, WeightInput};
pub use profile::{Gender, UserProfile};
pub use record::InsightRecord;
