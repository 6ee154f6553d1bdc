//! Gateway-level tests for the Diesel repositories.

mod support;

use gym_backend::domain::{
    AddressInput, FacilityDraft, ManagerDraft, OwnerDraft, OwnerPatch, TrainerDraft,
    TrainerDraftInput, TrainerPatch, TrainerPatchInput,
};
use gym_backend::outbound::persistence::{
    FacilityRepository, ManagerRepository, OwnerRepository, RepositoryError, TrainerRepository,
};
use pagination::PageParams;

fn owner_draft(name: &str, email: &str) -> OwnerDraft {
    OwnerDraft::parse(name, email, None).expect("valid owner draft")
}

#[test]
fn insert_then_find_round_trips_all_fields() {
    let (_guard, pool) = support::test_pool();
    let repo = OwnerRepository::new(pool);

    let created = repo
        .insert(&owner_draft("ada lovelace", "ada@example.com"))
        .expect("insert owner");
    let fetched = repo.find(created.id).expect("find owner");

    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "Ada Lovelace");
    assert_eq!(fetched.email, "ada@example.com");
}

#[test]
fn find_missing_row_is_not_found() {
    let (_guard, pool) = support::test_pool();
    let repo = OwnerRepository::new(pool);

    assert_eq!(repo.find(4711), Err(RepositoryError::NotFound));
}

#[test]
fn update_missing_row_is_not_found() {
    let (_guard, pool) = support::test_pool();
    let repo = OwnerRepository::new(pool);
    let patch = OwnerPatch::parse(Some("new name"), None, None).expect("valid patch");

    assert_eq!(repo.update(4711, &patch), Err(RepositoryError::NotFound));
}

#[test]
fn delete_missing_row_is_not_found() {
    let (_guard, pool) = support::test_pool();
    let repo = OwnerRepository::new(pool);

    assert_eq!(repo.delete(4711), Err(RepositoryError::NotFound));
}

#[test]
fn empty_patch_is_a_no_op_that_checks_existence() {
    let (_guard, pool) = support::test_pool();
    let repo = OwnerRepository::new(pool);
    let created = repo
        .insert(&owner_draft("ada lovelace", "ada@example.com"))
        .expect("insert owner");

    let unchanged = repo
        .update(created.id, &OwnerPatch::default())
        .expect("no-op update");
    assert_eq!(unchanged, created);

    assert_eq!(
        repo.update(4711, &OwnerPatch::default()),
        Err(RepositoryError::NotFound)
    );
}

#[test]
fn list_pages_in_id_order() {
    let (_guard, pool) = support::test_pool();
    let repo = OwnerRepository::new(pool);
    for (name, email) in [
        ("ada lovelace", "ada@example.com"),
        ("grace hopper", "grace@example.com"),
        ("alan turing", "alan@example.com"),
    ] {
        repo.insert(&owner_draft(name, email)).expect("insert");
    }

    let page = repo.list(PageParams::new(1, 1)).expect("list");

    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Grace Hopper");
}

#[test]
fn negative_paging_inputs_are_clamped() {
    let (_guard, pool) = support::test_pool();
    let repo = OwnerRepository::new(pool);
    repo.insert(&owner_draft("ada lovelace", "ada@example.com"))
        .expect("insert");

    let page = repo.list(PageParams::new(-5, -1)).expect("list");

    // Negative offset floors to zero, negative limit to an empty page.
    assert!(page.is_empty());
}

#[test]
fn dangling_foreign_key_is_distinguishable() {
    let (_guard, pool) = support::test_pool();
    let repo = ManagerRepository::new(pool);
    let draft = ManagerDraft::parse("grace hopper", "grace@example.com", None, Some(4711))
        .expect("valid draft");

    let err = repo.insert(&draft).expect_err("dangling owner must fail");

    assert!(matches!(err, RepositoryError::ForeignKey { .. }));
}

#[test]
fn deleting_a_referenced_row_is_a_foreign_key_error() {
    let (_guard, pool) = support::test_pool();
    let owners = OwnerRepository::new(pool.clone());
    let managers = ManagerRepository::new(pool);

    let owner = owners
        .insert(&owner_draft("ada lovelace", "ada@example.com"))
        .expect("insert owner");
    let manager_draft =
        ManagerDraft::parse("grace hopper", "grace@example.com", None, Some(owner.id))
            .expect("valid draft");
    managers.insert(&manager_draft).expect("insert manager");

    let err = owners.delete(owner.id).expect_err("delete must fail");

    assert!(matches!(err, RepositoryError::ForeignKey { .. }));
}

#[test]
fn facility_insert_persists_the_embedded_address() {
    let (_guard, pool) = support::test_pool();
    let owners = OwnerRepository::new(pool.clone());
    let facilities = FacilityRepository::new(pool);

    let owner = owners
        .insert(&owner_draft("ada lovelace", "ada@example.com"))
        .expect("insert owner");
    let draft = FacilityDraft::parse(
        "iron temple",
        AddressInput {
            street: "500 Capitol Mall".into(),
            city: "Sacramento".into(),
            state: "CALIFORNIA".into(),
            state_abbr: None,
            zip_code: "95814".into(),
        },
        owner.id,
        None,
    )
    .expect("valid draft");

    let facility = facilities.insert(&draft).expect("insert facility");
    let (fetched, fetched_owner) = facilities
        .find_with_owner(facility.id)
        .expect("find with owner");

    assert_eq!(fetched.address.state_abbr, "CA");
    assert_eq!(fetched_owner.id, owner.id);
}

#[test]
fn trainer_patch_clears_nullable_columns() {
    let (_guard, pool) = support::test_pool();
    let repo = TrainerRepository::new(pool);
    let trainer = repo
        .insert(
            &TrainerDraft::parse(TrainerDraftInput {
                name: "jane doe".into(),
                email: Some("jane@example.com".into()),
                bio: Some("Former powerlifter".into()),
                ..TrainerDraftInput::default()
            })
            .expect("valid draft"),
        )
        .expect("insert trainer");
    assert_eq!(trainer.email.as_deref(), Some("jane@example.com"));

    let patch = TrainerPatch::parse(TrainerPatchInput {
        email: Some(None),
        bio: Some(None),
        ..TrainerPatchInput::default()
    })
    .expect("valid patch");
    let updated = repo.update(trainer.id, &patch).expect("update trainer");

    assert_eq!(updated.email, None);
    assert_eq!(updated.bio, None);
    assert_eq!(updated.name, "Jane Doe");
}
