use super::common::*;
use crate::application::domain::{ApplicationStatus, DocumentSlot, DocumentState};

#[test]
fn three_of_four_verified_yields_seventy_five_and_nearly_complete() {
    let mut record = fresh_record("John Student");
    record.apply_verification(DocumentSlot::IdDocument, true, upload_date());
    record.apply_verification(DocumentSlot::MatricCertificate, true, upload_date());
    record.apply_verification(DocumentSlot::IncomeProof, true, upload_date());

    assert_eq!(record.progress, 75);
    assert_eq!(record.status, ApplicationStatus::NearlyComplete);
    assert_eq!(record.missing_labels(), vec!["Bank Statements"]);
    assert!(record.next_steps.contains("Bank Statements"));
}

#[test]
fn all_slots_verified_moves_the_application_under_review() {
    let mut record = fresh_record("John Student");
    for slot in DocumentSlot::ALL {
        record.apply_verification(slot, true, upload_date());
    }

    assert_eq!(record.progress, 100);
    assert_eq!(record.status, ApplicationStatus::UnderReview);
    assert!(record.next_steps.contains("under review"));
}

#[test]
fn one_verified_slot_is_in_progress() {
    let mut record = fresh_record("John Student");
    record.apply_verification(DocumentSlot::IdDocument, true, upload_date());

    assert_eq!(record.progress, 25);
    assert_eq!(record.status, ApplicationStatus::InProgress);
    assert_eq!(record.missing_labels().len(), 3);
}

#[test]
fn rejected_uploads_do_not_advance_progress() {
    let mut record = fresh_record("John Student");
    record.apply_verification(DocumentSlot::IdDocument, false, upload_date());

    assert_eq!(record.progress, 0);
    assert_eq!(record.status, ApplicationStatus::DocumentsRequired);
    let entry = record.documents[&DocumentSlot::IdDocument];
    assert_eq!(entry.state, DocumentState::Rejected);
    assert_eq!(entry.uploaded, Some(upload_date()));
    // a rejected slot is no longer "missing"
    assert_eq!(record.missing_labels().len(), 3);
}

#[test]
fn reupload_of_a_rejected_slot_can_verify_it() {
    let mut record = fresh_record("John Student");
    record.apply_verification(DocumentSlot::BankStatements, false, upload_date());
    record.apply_verification(DocumentSlot::BankStatements, true, upload_date());

    assert_eq!(
        record.documents[&DocumentSlot::BankStatements].state,
        DocumentState::Verified
    );
    assert_eq!(record.progress, 25);
}

#[test]
fn recompute_overwrites_seeded_approval() {
    let mut record = crate::application::roster::seed_defaults()
        .into_iter()
        .find(|record| record.student_id == "DEMO002")
        .expect("seeded approval present");
    assert_eq!(record.status, ApplicationStatus::Approved);

    record.recompute();

    assert_eq!(record.progress, 100);
    assert_eq!(record.status, ApplicationStatus::UnderReview);
}
