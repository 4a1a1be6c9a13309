// Resume ingestion: PDF text extraction, vocabulary-based skill extraction,
// and the upload pipeline that ties them together for the applicant handlers.

pub mod extract;
pub mod pipeline;
pub mod skills;
pub mod vocabulary;

#[cfg(test)]
pub(crate) mod test_pdf;
