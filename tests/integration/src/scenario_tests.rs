//! End-to-end reconciliation scenarios
//!
//! Each test inserts clauses the way the insertion path does (catalog +
//! baseline metadata -> tag), edits the document, and runs a pass.

use clause_catalog::{BaselineRecord, Catalog};
use clause_content::{encode, fingerprint_text};
use clause_core::{
    ClassificationMode, ComplianceState, ComplianceStatus, MemoryDocument, MemoryHost,
    ReconciliationDriver, RegionDecision,
};
use pretty_assertions::assert_eq;

const INDEX: &str = r#"[
  {"clauseId": "NDA-1", "title": "Mutual NDA", "version": "v1",
   "clauseJsonUrl": "./NDA-1.json", "clauseDocxUrl": "./NDA-1.docx"},
  {"clauseId": "MISC-9", "title": "Notices", "version": "v1"}
]"#;

const NDA_BODY: &str = "Each party shall keep the other party's Confidential Information \
secret and use it only to evaluate the Transaction.";

const GREEN: &str = "BrightGreen";
const YELLOW: &str = "Yellow";
const RED: &str = "Red";

/// Insert NDA-1 into a fresh document and return it with the tag used.
fn contract_with_nda() -> (MemoryDocument, String) {
    let catalog = Catalog::parse(INDEX).unwrap();
    let metadata = format!(r#"{{"baselineFingerprint": "{}"}}"#, fingerprint_text(NDA_BODY));
    let baseline = BaselineRecord::parse(&metadata).unwrap();
    let tag = encode(&catalog.approved_tag("NDA-1", &baseline).unwrap());

    // The editor hands text back with its own line endings and spacing
    let as_rendered = NDA_BODY.replace("Information ", "Information\u{a0}") + "\r\n";
    let document = MemoryDocument::new().with_region(tag.clone(), as_rendered);
    (document, tag)
}

#[tokio::test]
async fn test_unchanged_region_is_verified() {
    let (document, tag) = contract_with_nda();
    let mut host = MemoryHost::new(document);

    let report = ReconciliationDriver::default().validate(&mut host).await.unwrap();

    assert_eq!(report.decisions[&tag], RegionDecision::verified());
    assert_eq!(report.status(), ComplianceStatus::Compliant);
    assert_eq!(host.document().regions[0].highlight.as_deref(), Some(GREEN));
}

#[tokio::test]
async fn test_pending_insertion_is_drifted() {
    let (mut document, tag) = contract_with_nda();
    let at = document.regions[0].text.find("secret").unwrap();
    document.regions[0].insert_tracked(at, "strictly ");
    let mut host = MemoryHost::new(document);

    let report = ReconciliationDriver::default().validate(&mut host).await.unwrap();

    let decision = report.decisions[&tag];
    assert_eq!(decision.state, ComplianceState::Drifted);
    assert!(decision.overlay_insertions);

    let region = &host.document().regions[0];
    assert_eq!(region.highlight.as_deref(), Some(GREEN));
    assert_eq!(region.inserted_text(), vec!["strictly "]);
    assert_eq!(region.changes[0].highlight.as_deref(), Some(YELLOW));
}

#[tokio::test]
async fn test_accepted_edit_is_fallback() {
    let (mut document, tag) = contract_with_nda();
    let at = document.regions[0].text.find("secret").unwrap();
    document.regions[0].insert_tracked(at, "strictly ");
    document.accept_all_changes();
    let mut host = MemoryHost::new(document);

    let report = ReconciliationDriver::default().validate(&mut host).await.unwrap();

    assert_eq!(report.decisions[&tag], RegionDecision::fallback());
    assert_eq!(report.status(), ComplianceStatus::NeedsReview);
    assert_eq!(host.document().regions[0].highlight.as_deref(), Some(YELLOW));
}

#[tokio::test]
async fn test_untracked_edit_is_fallback() {
    let (mut document, tag) = contract_with_nda();
    let edited = document.regions[0].text.replace("only", "mainly");
    document.regions[0].edit_untracked(edited);
    let mut host = MemoryHost::new(document);

    let report = ReconciliationDriver::default().validate(&mut host).await.unwrap();

    assert_eq!(report.decisions[&tag].state, ComplianceState::DriftedFallback);
}

#[tokio::test]
async fn test_template_without_baseline_never_verifies() {
    let catalog = Catalog::parse(INDEX).unwrap();
    let tag = encode(&catalog.template_tag("MISC-9", None).unwrap());
    assert_eq!(tag, "Template|MISC-9|v1|h");

    let mut document = MemoryDocument::new().with_region(tag.clone(), "Notices go by email.");
    let mut host = MemoryHost::new(document.clone());
    let report = ReconciliationDriver::default().validate(&mut host).await.unwrap();
    assert_eq!(report.decisions[&tag].state, ComplianceState::DriftedFallback);

    // Pending insertions route it through the overlay branch instead
    document.regions[0].insert_tracked(0, "All ");
    let mut host = MemoryHost::new(document);
    let report = ReconciliationDriver::default().validate(&mut host).await.unwrap();
    assert_eq!(report.decisions[&tag].state, ComplianceState::Drifted);
}

#[tokio::test]
async fn test_no_change_tracking_means_fallback() {
    let (mut document, tag) = contract_with_nda();
    let at = document.regions[0].text.find("secret").unwrap();
    document.regions[0].insert_tracked(at, "strictly ");
    let mut host = MemoryHost::new(document).with_change_tracking(false);

    let report = ReconciliationDriver::default().validate(&mut host).await.unwrap();

    assert_eq!(report.mode, ClassificationMode::TwoState);
    assert_eq!(report.decisions[&tag], RegionDecision::fallback());
    assert_eq!(report.notices.len(), 1);

    let region = &host.document().regions[0];
    assert_eq!(region.highlight.as_deref(), Some(YELLOW));
    // The entire region is flagged; no overlay batch ran
    assert_eq!(region.changes[0].highlight.as_deref(), Some(YELLOW));
    assert_eq!(host.commits(), 2);
}

#[tokio::test]
async fn test_mixed_document_summary() {
    let (mut document, _) = contract_with_nda();
    let nda_tag = document.regions[0].tag.clone();
    let mut edited = document.regions[0].clone();
    edited.insert_tracked(0, "Notwithstanding clause 2, ");
    edited.tag = nda_tag.replace("NDA-1", "NDA-1b");
    document.regions.push(edited);
    document.push_region("Template|MISC-9|v1|h", "Notices go by email.");
    document.push_region("CLIENT_NAME", "Acme Ltd");
    let mut host = MemoryHost::new(document);

    let report = ReconciliationDriver::default().validate(&mut host).await.unwrap();

    assert_eq!(
        report.summary(),
        "3 managed regions: 1 verified, 1 drifted (pending insertions), 1 needs review"
    );
    assert_eq!(host.document().regions[3].highlight.as_deref(), Some(RED));
}
