use serde::{Deserialize, Serialize};

use crate::application::DocumentSlot;

/// Broad grouping used by the application checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Identification,
    Academic,
    Financial,
    General,
}

impl DocumentCategory {
    pub const fn label(self) -> &'static str {
        match self {
            DocumentCategory::Identification => "identification",
            DocumentCategory::Academic => "academic",
            DocumentCategory::Financial => "financial",
            DocumentCategory::General => "general",
        }
    }
}

/// Result of keyword-scoring a document against the fixed taxonomy.
/// Confidence is heuristic (0-100), assigned per rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub detected_type: String,
    pub category: DocumentCategory,
    pub status_line: String,
    pub confidence: u8,
    pub details: String,
    pub priority: u8,
}

impl Classification {
    fn new(
        detected_type: &str,
        category: DocumentCategory,
        status_line: &str,
        confidence: u8,
        details: &str,
        priority: u8,
    ) -> Self {
        Self {
            detected_type: detected_type.to_string(),
            category,
            status_line: status_line.to_string(),
            confidence,
            details: details.to_string(),
            priority,
        }
    }
}

/// Classify by extracted text content. Rules are evaluated in a fixed
/// priority order and the first match wins; a text containing both matric and
/// bank-statement keywords is always a Matric Certificate.
pub fn classify_content(text_lower: &str, filename: &str) -> Classification {
    if contains_any(
        text_lower,
        &[
            "identity number",
            "id number",
            "south african",
            "republic of south africa",
            "identity document",
        ],
    ) {
        return Classification::new(
            "South African Identity Document",
            DocumentCategory::Identification,
            "Valid ID document detected",
            95,
            "🆔 **Verified**: South African Identity Document with ID number detected",
            1,
        );
    }

    if contains_any(
        text_lower,
        &[
            "matric",
            "grade 12",
            "senior certificate",
            "national senior certificate",
            "department of education",
        ],
    ) {
        return Classification::new(
            "Matric Certificate (Grade 12)",
            DocumentCategory::Academic,
            "Academic qualification verified",
            90,
            "🎓 **Verified**: Matric Certificate with academic results detected",
            2,
        );
    }

    if contains_any(
        text_lower,
        &[
            "bank statement",
            "account balance",
            "transaction",
            "deposit",
            "withdrawal",
            "banking details",
        ],
    ) {
        return Classification::new(
            "Bank Statement",
            DocumentCategory::Financial,
            "Financial document verified",
            85,
            "🏦 **Verified**: Bank statement with transaction history detected",
            4,
        );
    }

    if contains_any(
        text_lower,
        &[
            "salary",
            "income",
            "payslip",
            "pay slip",
            "gross salary",
            "net salary",
            "employer",
        ],
    ) {
        return Classification::new(
            "Income Proof / Payslip",
            DocumentCategory::Financial,
            "Income verification document",
            88,
            "💰 **Verified**: Income proof with salary details detected",
            3,
        );
    }

    if contains_any(
        text_lower,
        &[
            "transcript",
            "academic record",
            "university",
            "college",
            "degree",
            "diploma",
        ],
    ) {
        return Classification::new(
            "Academic Transcript",
            DocumentCategory::Academic,
            "Additional academic record",
            80,
            "📚 **Verified**: Academic transcript with course details detected",
            5,
        );
    }

    let mut fallback = classify_filename(filename);
    fallback.confidence = 50;
    fallback.details =
        "📄 **Note**: Document type determined from filename (content analysis inconclusive)"
            .to_string();
    fallback
}

/// Filename-only heuristics, used when OCR produced nothing usable.
pub fn classify_filename(filename: &str) -> Classification {
    let name_lower = filename.to_lowercase();

    if name_lower.contains("id") || name_lower.contains("identity") {
        Classification::new(
            "Identity Document",
            DocumentCategory::Identification,
            "ID document (filename-based)",
            60,
            "🆔 **Filename**: Appears to be an Identity Document",
            1,
        )
    } else if name_lower.contains("matric")
        || name_lower.contains("grade 12")
        || name_lower.contains("certificate")
    {
        Classification::new(
            "Matric Certificate",
            DocumentCategory::Academic,
            "Academic certificate (filename-based)",
            60,
            "🎓 **Filename**: Appears to be a Matric Certificate",
            2,
        )
    } else {
        Classification::new(
            "Supporting Document",
            DocumentCategory::General,
            "Additional document received",
            40,
            "📄 **General**: Document uploaded successfully",
            7,
        )
    }
}

/// Map an upload to the required-document slot it should fill, by filename.
pub fn slot_for_upload(filename: &str) -> DocumentSlot {
    let name_lower = filename.to_lowercase();

    if name_lower.contains("id") || name_lower.contains("identity") {
        DocumentSlot::IdDocument
    } else if name_lower.contains("matric") || name_lower.contains("certificate") {
        DocumentSlot::MatricCertificate
    } else if name_lower.contains("income")
        || name_lower.contains("salary")
        || name_lower.contains("payslip")
    {
        DocumentSlot::IncomeProof
    } else if name_lower.contains("bank") || name_lower.contains("statement") {
        DocumentSlot::BankStatements
    } else {
        // payslips arrive under all sorts of names; default to income proof
        DocumentSlot::IncomeProof
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}
