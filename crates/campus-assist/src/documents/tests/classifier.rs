use crate::application::DocumentSlot;
use crate::documents::classifier::{
    classify_content, classify_filename, slot_for_upload, DocumentCategory,
};

#[test]
fn identity_keywords_win_with_top_confidence() {
    let classification = classify_content(
        "republic of south africa identity number 9001015800085",
        "scan.jpg",
    );

    assert_eq!(
        classification.detected_type,
        "South African Identity Document"
    );
    assert_eq!(classification.category, DocumentCategory::Identification);
    assert_eq!(classification.confidence, 95);
}

#[test]
fn priority_order_is_deterministic_matric_beats_bank() {
    // text matching both the matric and bank-statement rules
    let classification = classify_content(
        "matric results attached alongside a bank statement for the period",
        "combo.pdf",
    );

    assert_eq!(classification.detected_type, "Matric Certificate (Grade 12)");
    assert_eq!(classification.confidence, 90);
}

#[test]
fn income_keywords_classify_as_payslip() {
    let classification = classify_content("gross salary and employer details", "upload.png");

    assert_eq!(classification.detected_type, "Income Proof / Payslip");
    assert_eq!(classification.category, DocumentCategory::Financial);
    assert_eq!(classification.confidence, 88);
}

#[test]
fn inconclusive_content_falls_back_to_filename_at_fifty() {
    let classification = classify_content("lorem ipsum dolor sit amet", "matric_scan.jpg");

    assert_eq!(classification.detected_type, "Matric Certificate");
    assert_eq!(classification.confidence, 50);
    assert!(classification.details.contains("filename"));
}

#[test]
fn filename_rules_sit_in_the_forty_to_sixty_band() {
    assert_eq!(classify_filename("my_identity.png").confidence, 60);
    assert_eq!(classify_filename("certificate.pdf").confidence, 60);
    assert_eq!(classify_filename("vacation_photo.jpg").confidence, 40);
}

#[test]
fn uploads_map_to_required_document_slots_by_filename() {
    assert_eq!(slot_for_upload("sa_id_card.jpg"), DocumentSlot::IdDocument);
    assert_eq!(
        slot_for_upload("matric_2019.pdf"),
        DocumentSlot::MatricCertificate
    );
    assert_eq!(slot_for_upload("payslip_oct.pdf"), DocumentSlot::IncomeProof);
    assert_eq!(
        slot_for_upload("fnb_statement.pdf"),
        DocumentSlot::BankStatements
    );
    assert_eq!(slot_for_upload("mystery.bin"), DocumentSlot::IncomeProof);
}
