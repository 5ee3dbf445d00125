pub mod classifier;
pub mod html;
pub mod metrics;
pub mod naming;
pub mod renderer;
pub mod report;

pub use classifier::{classify_report, ClassifiedFindings};
pub use renderer::{ChromiumRenderer, PdfRenderer};
pub use report::{build_report, ReportService};
