pub mod records;

pub use records::{
    CodeGenerationRecord, CodeInput, EmailInput, EmailRecord, PdfSummaryRecord, Record,
    RecordData, RecordKind, ResumeInput, ResumeRecord, SummaryInput, TextCorrectionRecord,
};
