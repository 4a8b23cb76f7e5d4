#![allow(clippy::unwrap_used, clippy::expect_used)]

use modelver_core::grammar::DropReason;
use modelver_core::merge::merge;
use modelver_core::normalize::BlockSource;
use modelver_core::{normalize, Element, ElementKind, Proposal};

fn el(s: &str) -> Element {
    Element::new(s)
}

fn delta(raw: &str, kind: ElementKind) -> modelver_core::ChangeSet {
    match normalize(raw, kind).proposal {
        Proposal::Delta(changes) => changes,
        other => panic!("expected delta, got {:?}", other),
    }
}

fn replacement(raw: &str, kind: ElementKind) -> Vec<Element> {
    match normalize(raw, kind).proposal {
        Proposal::Replacement(list) => list,
        other => panic!("expected replacement, got {:?}", other),
    }
}

#[test]
fn test_sectioned_result_block() {
    let raw = "\
Here are the class changes.

```RESULT
Added:
- Payment
- WechatPay
Deleted:
- BankCard
Modified:
- Order => PurchaseOrder
```

Let me know if you need anything else.";

    let changes = delta(raw, ElementKind::Class);
    assert_eq!(changes.added, [el("Payment"), el("WechatPay")].into_iter().collect());
    assert_eq!(changes.deleted, [el("BankCard")].into_iter().collect());
    assert_eq!(changes.modified, vec![(el("Order"), el("PurchaseOrder"))]);
}

#[test]
fn test_chinese_section_labels() {
    let raw = "```RESULT\n新增:\nUser.phone\n删除:\nUser.fax\n修改:\nUser.mail => User.email\n```";
    let changes = delta(raw, ElementKind::Attribute);
    assert!(changes.added.contains(&el("User.phone")));
    assert!(changes.deleted.contains(&el("User.fax")));
    assert_eq!(changes.modified, vec![(el("User.mail"), el("User.email"))]);
}

#[test]
fn test_pair_survives_only_if_both_sides_validate() {
    let raw = "```RESULT\nModified:\nOrder => Purchase Order\nCart => Basket\n```";
    let out = normalize(raw, ElementKind::Class);
    let Proposal::Delta(changes) = out.proposal else {
        panic!("expected delta");
    };
    assert_eq!(changes.modified, vec![(el("Cart"), el("Basket"))]);
    assert_eq!(out.dropped.len(), 1);
    assert_eq!(out.dropped[0].reason, DropReason::MalformedPair);
}

#[test]
fn test_flat_list_is_replacement_and_canonicalized() {
    let raw = "```RESULT\n* User <extend> Admin\n* Order <:Association:> Product\n```";
    assert_eq!(
        replacement(raw, ElementKind::Relation),
        vec![el("User<:extends:>Admin"), el("Order<:association:>Product")]
    );
}

#[test]
fn test_malformed_lines_are_dropped_not_fatal() {
    let raw = "```RESULT\nUser -> PaymentService: pay\nthis is chatter\nBank->User:\n```";
    let out = normalize(raw, ElementKind::Message);
    assert_eq!(out.proposal, Proposal::Replacement(vec![el("User->PaymentService: pay")]));
    assert_eq!(out.dropped.len(), 2);
    assert!(out
        .dropped
        .iter()
        .all(|d| d.reason == DropReason::PatternMismatch));
}

#[test]
fn test_no_fence_scans_whole_text() {
    let out = normalize("Customer\nClerk\n", ElementKind::Actor);
    assert_eq!(out.source, BlockSource::WholeText);
    assert_eq!(
        out.proposal,
        Proposal::Replacement(vec![el("Customer"), el("Clerk")])
    );
}

#[test]
fn test_garbage_yields_empty_proposal() {
    let out = normalize("I could not understand the request!", ElementKind::Relation);
    assert!(out.proposal.is_empty());
    assert_eq!(out.dropped.len(), 1);
}

#[test]
fn test_empty_text() {
    let out = normalize("", ElementKind::Class);
    assert!(out.proposal.is_empty());
    assert!(out.dropped.is_empty());
}

#[test]
fn test_lines_before_first_label_are_dropped() {
    let raw = "```RESULT\nStray\nAdded:\nPayment\n```";
    let out = normalize(raw, ElementKind::Class);
    assert_eq!(out.dropped.len(), 1);
    assert_eq!(out.dropped[0].reason, DropReason::OutsideSection);
}

#[test]
fn test_flow_keeps_order_and_repeats() {
    let raw = "```RESULT\nloop retry\n  A->B: ping\nend\nopt audit\nB->C: log\nend\n```";
    assert_eq!(
        replacement(raw, ElementKind::Flow),
        vec![
            el("loop retry"),
            el("A->B: ping"),
            el("end"),
            el("opt audit"),
            el("B->C: log"),
            el("end"),
        ]
    );
}

#[test]
fn test_labels_with_collection_words() {
    let changes = delta(
        "```RESULT\nAdded classes:\n- Payment\nDeleted classes:\n- Cash\n```",
        ElementKind::Class,
    );
    assert_eq!(changes.added, [el("Payment")].into_iter().collect());
    assert_eq!(changes.deleted, [el("Cash")].into_iter().collect());

    let changes = delta("Deleted actors:\n- Clerk", ElementKind::Actor);
    assert_eq!(changes.deleted, [el("Clerk")].into_iter().collect());

    let changes = delta(
        "```RESULT\nModified relations:\nA<:association:>B => A<:composition:>B\n```",
        ElementKind::Relation,
    );
    assert_eq!(
        changes.modified,
        vec![(el("A<:association:>B"), el("A<:composition:>B"))]
    );
}

#[test]
fn test_qualified_labels_do_not_wipe_baseline() {
    let out = normalize(
        "```RESULT\nAdded classes:\n- Payment\nDeleted classes:\n- Cash\n```",
        ElementKind::Class,
    );
    let baseline = vec![el("Cash"), el("Order"), el("User")];
    let merged = merge(ElementKind::Class, &baseline, &out.proposal).unwrap();
    assert_eq!(merged.elements, vec![el("Order"), el("Payment"), el("User")]);
}

#[test]
fn test_heading_labels_add_no_title_elements() {
    let changes = delta(
        "```RESULT\n### Added Classes\n- Payment\n### Deleted Classes\n- Cash\n```",
        ElementKind::Class,
    );
    assert_eq!(changes.added, [el("Payment")].into_iter().collect());
    assert_eq!(changes.deleted, [el("Cash")].into_iter().collect());

    let changes = delta("## Added Actors\n- Customer", ElementKind::Actor);
    assert!(!changes.added.contains(&el("Actors")));
    assert!(changes.added.contains(&el("Customer")));
}
