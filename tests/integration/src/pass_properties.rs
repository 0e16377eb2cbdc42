//! Property tests over whole reconciliation passes

use clause_content::{decode, fingerprint_text};
use clause_core::{MemoryDocument, MemoryHost, ReconciliationDriver};
use proptest::prelude::*;

/// One generated region: body, whether the tag carries its baseline, and
/// what happened to it since insertion.
#[derive(Debug, Clone)]
enum Edit {
    None,
    Tracked(String),
    Accepted(String),
}

fn region() -> impl Strategy<Value = (String, bool, bool, Edit)> {
    let body = "[A-Za-z ]{1,40}";
    let edit = prop_oneof![
        Just(Edit::None),
        "[a-z]{1,8}".prop_map(Edit::Tracked),
        "[a-z]{1,8}".prop_map(Edit::Accepted),
    ];
    (body, any::<bool>(), any::<bool>(), edit)
}

fn build(regions: &[(String, bool, bool, Edit)]) -> MemoryDocument {
    let mut document = MemoryDocument::new();
    for (i, (body, with_baseline, managed, edit)) in regions.iter().enumerate() {
        let tag = match (managed, with_baseline) {
            (false, _) => format!("foreign-{}", i),
            (true, true) => format!("Approved|C-{}|v1|h{}", i, fingerprint_text(body)),
            (true, false) => format!("Template|C-{}|v1|h", i),
        };
        let index = document.push_region(tag, body.clone());
        let region = document.region_mut(index).unwrap();
        match edit {
            Edit::None => {}
            Edit::Tracked(text) => region.insert_tracked(0, text),
            Edit::Accepted(text) => {
                region.insert_tracked(0, text);
                region.accept_all_changes();
            }
        }
    }
    document
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().build().unwrap()
}

proptest! {
    #[test]
    fn test_every_managed_tag_gets_one_decision(regions in prop::collection::vec(region(), 0..8)) {
        let document = build(&regions);
        let managed = document.regions.iter().filter(|r| decode(&r.tag).is_some()).count();
        let mut host = MemoryHost::new(document);

        let report = runtime()
            .block_on(ReconciliationDriver::default().validate(&mut host))
            .unwrap();

        // Tags are distinct per region here, so decisions and regions line up
        prop_assert_eq!(report.decisions.len(), managed);
        prop_assert_eq!(report.total(), managed);
    }

    #[test]
    fn test_pass_is_idempotent(regions in prop::collection::vec(region(), 0..8)) {
        let mut host = MemoryHost::new(build(&regions));
        let driver = ReconciliationDriver::default();
        let rt = runtime();

        let first = rt.block_on(driver.validate(&mut host)).unwrap();
        let painted = host.document().clone();
        let second = rt.block_on(driver.validate(&mut host)).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(host.document(), &painted);
    }
}
