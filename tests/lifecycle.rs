//! Full lifecycle flows: create, self-edit, disable, delete.

use palisade::actions::{
    ChangePasswordAction, CreateUserAction, DeleteUserAction, DisableUserAction, GetUserAction,
    ProvisionCompanyAction,
};
use palisade::crypto::{Argon2Hasher, PasswordHasher};
use palisade::repository::{MockStore, NewCompany, NewUser, RoleRepository};
use palisade::roles::ADMIN_ROLE;
use palisade::{
    AclPermission, AclStore, ActorContext, AuthError, MemoryAclStore, ObjectRef, SecretString,
    User, UserRepository,
};

const GOOD_PASSWORD: &str = "Ab1!Ab1!cde";

struct Harness {
    store: MockStore,
    acl: MemoryAclStore,
}

impl Harness {
    async fn new() -> Self {
        let store = MockStore::new();
        let acl = MemoryAclStore::new();
        ProvisionCompanyAction::new(store.clone())
            .execute(NewCompany::new("Acme Corp", "ACME"))
            .await
            .unwrap();
        Self { store, acl }
    }

    async fn create_user(&self, login: &str, roles: &[&str]) -> User {
        CreateUserAction::new(self.store.clone(), self.store.clone(), self.acl.clone())
            .execute(
                &ActorContext::new("root", [ADMIN_ROLE]),
                NewUser::new(login, SecretString::new(GOOD_PASSWORD), roles.to_vec()),
            )
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn create_then_self_edit_password() {
    let h = Harness::new().await;
    let user = h.create_user("jdoe", &["ROLE_ACME_LOCAL_USER"]).await;

    // the creation-time WRITE grant lets the user edit itself
    let me = ActorContext::new("jdoe", ["ROLE_ACME_LOCAL_USER"]);
    ChangePasswordAction::new(h.store.clone(), h.acl.clone())
        .execute(&me, user.id, &SecretString::new("Xy9@Xy9@abc"))
        .await
        .unwrap();

    let stored = h.store.find_by_id(user.id).await.unwrap().unwrap();
    assert!(Argon2Hasher::default()
        .verify("Xy9@Xy9@abc", &stored.hashed_password)
        .unwrap());
}

#[tokio::test]
async fn edit_requires_syntactically_valid_password_every_time() {
    let h = Harness::new().await;
    let user = h.create_user("jdoe", &["ROLE_ACME_LOCAL_USER"]).await;

    let me = ActorContext::new("jdoe", ["ROLE_ACME_LOCAL_USER"]);
    // resubmitting a weak password is rejected even though the account
    // already exists — every edit revalidates
    let result = ChangePasswordAction::new(h.store.clone(), h.acl.clone())
        .execute(&me, user.id, &SecretString::new("weakpass"))
        .await;

    assert!(matches!(result, Err(AuthError::WeakCredential(_))));
}

#[tokio::test]
async fn disable_then_delete_still_works() {
    let h = Harness::new().await;
    let user = h.create_user("jdoe", &["ROLE_ACME_LOCAL_USER"]).await;
    let object = ObjectRef::user(user.id);
    h.acl
        .grant("operator", &object, AclPermission::Write)
        .await
        .unwrap();

    let operator = ActorContext::new("operator", ["ROLE_ACME_LOCAL_ADMIN"]);

    DisableUserAction::new(h.store.clone(), h.acl.clone())
        .execute(&operator, user.id)
        .await
        .unwrap();
    let stored = h.store.find_by_id(user.id).await.unwrap().unwrap();
    assert!(!stored.enabled);

    // a disabled account is still deletable
    DeleteUserAction::new(h.store.clone(), h.acl.clone())
        .execute(&operator, user.id)
        .await
        .unwrap();
    assert!(h.store.find_by_id(user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_revokes_the_self_grants() {
    let h = Harness::new().await;
    let user = h.create_user("jdoe", &["ROLE_ACME_LOCAL_USER"]).await;
    let object = ObjectRef::user(user.id);
    h.acl
        .grant("operator", &object, AclPermission::Write)
        .await
        .unwrap();

    let operator = ActorContext::new("operator", ["ROLE_ACME_LOCAL_ADMIN"]);
    DeleteUserAction::new(h.store.clone(), h.acl.clone())
        .execute(&operator, user.id)
        .await
        .unwrap();

    assert!(h.acl.grants_for("jdoe", &object).await.unwrap().is_empty());
}

#[tokio::test]
async fn admin_holder_can_never_be_disabled_or_deleted() {
    let h = Harness::new().await;
    h.store.insert_role(ADMIN_ROLE);

    // seed an admin user directly; the create path refuses to mint one
    let root = h
        .store
        .create(palisade::UserCandidate {
            login: "root".to_owned(),
            hashed_password: "hash".to_owned(),
            enabled: true,
            roles: vec![h.store.find_by_name(ADMIN_ROLE).await.unwrap().unwrap()],
        })
        .await
        .unwrap();
    let object = ObjectRef::user(root.id);
    h.acl
        .grant("root", &object, AclPermission::Write)
        .await
        .unwrap();

    let itself = ActorContext::new("root", [ADMIN_ROLE]);

    let result = DisableUserAction::new(h.store.clone(), h.acl.clone())
        .execute(&itself, root.id)
        .await;
    assert!(matches!(result, Err(AuthError::AccessDenied(_))));

    let result = DeleteUserAction::new(h.store.clone(), h.acl.clone())
        .execute(&itself, root.id)
        .await;
    assert!(matches!(result, Err(AuthError::AccessDenied(_))));

    let stored = h.store.find_by_id(root.id).await.unwrap().unwrap();
    assert!(stored.enabled);
}

#[tokio::test]
async fn single_read_shapes_denial_as_not_found() {
    let h = Harness::new().await;
    let user = h.create_user("jdoe", &["ROLE_ACME_LOCAL_USER"]).await;

    let stranger = ActorContext::new("stranger", ["ROLE_ACME_LOCAL_USER"]);
    let action = GetUserAction::new(h.store.clone(), h.acl.clone());

    let forbidden = action.execute(&stranger, user.id).await.unwrap_err();
    let missing = action.execute(&stranger, 4242).await.unwrap_err();
    assert_eq!(forbidden, AuthError::NotFound);
    assert_eq!(missing, AuthError::NotFound);

    // the record's own view carries owner and grants
    let me = ActorContext::new("jdoe", ["ROLE_ACME_LOCAL_USER"]);
    let view = action.execute(&me, user.id).await.unwrap();
    assert_eq!(view.owner, Some("jdoe".to_owned()));
    assert_eq!(view.acls, vec![AclPermission::Read, AclPermission::Write]);
}

#[tokio::test]
async fn provisioning_fails_fast_without_transactions() {
    let store = MockStore::without_atomic_provisioning();

    let result = ProvisionCompanyAction::new(store.clone())
        .execute(NewCompany::new("Acme Corp", "ACME"))
        .await;

    assert_eq!(result.unwrap_err(), AuthError::TransactionUnsupported);
    assert!(palisade::repository::CompanyRepository::find_all(&store)
        .await
        .unwrap()
        .is_empty());
    assert!(RoleRepository::find_all(&store).await.unwrap().is_empty());
}
