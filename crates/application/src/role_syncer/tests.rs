use std::collections::HashSet;
use std::sync::Arc;

use cloudamqp_core::AppError;
use cloudamqp_domain::{Grant, ResourceId, TeamRole, TeamUser};

use super::{RoleSyncer, member_entitlement, role_resource};
use crate::test_support::FakeTeamDirectory;
use crate::{ResourceSyncer, user_resource};

fn users() -> Vec<TeamUser> {
    vec![
        TeamUser::new("u-1", "admin@example.com", vec!["admin".to_owned()]),
        TeamUser::new("u-2", "ops@example.com", vec!["devops".to_owned()]),
        TeamUser::new(
            "u-3",
            "finance@example.com",
            vec!["billing manager".to_owned()],
        ),
        TeamUser::new("u-4", "new@example.com", Vec::new()),
    ]
}

fn syncer(directory: Arc<FakeTeamDirectory>, provisioning: bool) -> RoleSyncer {
    RoleSyncer::new(directory, provisioning)
}

#[tokio::test]
async fn list_returns_fixed_catalog_without_api_calls() {
    let directory = Arc::new(FakeTeamDirectory::failing(500));
    let syncer = syncer(directory.clone(), true);

    let page = syncer
        .list(None, None)
        .await
        .unwrap_or_else(|error| panic!("list failed: {error}"));

    let ids: Vec<&str> = page
        .items
        .iter()
        .map(|resource| resource.id.resource.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "admin",
            "devops",
            "member",
            "monitor",
            "billing manager",
            "compliance manager"
        ]
    );
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(unique.len(), 6);
    assert!(page.next_page_token.is_none());
    assert_eq!(directory.list_calls().await, 0);
}

#[test]
fn role_resource_carries_profile() {
    let resource = role_resource(TeamRole::ComplianceManager);

    assert_eq!(resource.id.resource_type, "role");
    assert_eq!(resource.display_name, "Compliance Manager");
    assert_eq!(resource.profile()["role_id"], "compliance manager");
    assert_eq!(resource.profile()["role_name"], "Compliance Manager");
}

#[tokio::test]
async fn entitlements_expose_single_member_assignment() {
    let syncer = syncer(Arc::new(FakeTeamDirectory::default()), true);
    let resource = role_resource(TeamRole::Admin);

    let page = syncer
        .entitlements(&resource, None)
        .await
        .unwrap_or_else(|error| panic!("entitlements failed: {error}"));

    assert_eq!(page.items.len(), 1);
    let entitlement = &page.items[0];
    assert_eq!(entitlement.id, "role:admin:member");
    assert_eq!(entitlement.slug, "member");
    assert_eq!(entitlement.display_name, "Admin role");
    assert_eq!(entitlement.description, "Admin CloudAMQP role");
    assert!(entitlement.is_grantable_to("user"));
    assert_eq!(entitlement.grantable_to.len(), 1);
}

#[tokio::test]
async fn entitlements_reject_non_role_resources() {
    let syncer = syncer(Arc::new(FakeTeamDirectory::default()), true);
    let principal = user_resource(&users()[0]);

    let result = syncer.entitlements(&principal, None).await;
    assert!(matches!(result, Err(AppError::TypeMismatch(_))));
}

#[tokio::test]
async fn grants_include_only_holders_of_the_role() {
    let syncer = syncer(Arc::new(FakeTeamDirectory::with_users(users())), true);

    let admin = syncer
        .grants(&role_resource(TeamRole::Admin), None)
        .await
        .unwrap_or_else(|error| panic!("grants failed: {error}"));
    let monitor = syncer
        .grants(&role_resource(TeamRole::Monitor), None)
        .await
        .unwrap_or_else(|error| panic!("grants failed: {error}"));

    assert_eq!(admin.items.len(), 1);
    assert_eq!(admin.items[0].principal, ResourceId::new("user", "u-1"));
    assert_eq!(admin.items[0].id, "role:admin:member:user:u-1");
    assert!(monitor.items.is_empty());
}

#[tokio::test]
async fn grants_match_multi_word_roles() {
    let syncer = syncer(Arc::new(FakeTeamDirectory::with_users(users())), true);

    let page = syncer
        .grants(&role_resource(TeamRole::BillingManager), None)
        .await
        .unwrap_or_else(|error| panic!("grants failed: {error}"));

    let principals: Vec<&str> = page
        .items
        .iter()
        .map(|grant| grant.principal.resource.as_str())
        .collect();
    assert_eq!(principals, vec!["u-3"]);
}

#[tokio::test]
async fn users_without_roles_hold_member() {
    let syncer = syncer(Arc::new(FakeTeamDirectory::with_users(users())), true);

    let page = syncer
        .grants(&role_resource(TeamRole::Member), None)
        .await
        .unwrap_or_else(|error| panic!("grants failed: {error}"));

    let principals: Vec<&str> = page
        .items
        .iter()
        .map(|grant| grant.principal.resource.as_str())
        .collect();
    assert_eq!(principals, vec!["u-4"]);
}

#[tokio::test]
async fn grants_propagate_status_with_context() {
    let syncer = syncer(Arc::new(FakeTeamDirectory::failing(502)), true);

    let error = match syncer.grants(&role_resource(TeamRole::Admin), None).await {
        Ok(_) => panic!("grants should fail"),
        Err(error) => error,
    };

    assert_eq!(error.status(), Some(502));
    assert!(
        error
            .to_string()
            .starts_with("cloudamqp-connector: failed to get users")
    );
}

#[tokio::test]
async fn grants_reject_non_role_resources() {
    let syncer = syncer(Arc::new(FakeTeamDirectory::with_users(users())), true);
    let principal = user_resource(&users()[0]);

    let result = syncer.grants(&principal, None).await;
    assert!(matches!(result, Err(AppError::TypeMismatch(_))));
}

#[tokio::test]
async fn grant_updates_user_role() {
    let directory = Arc::new(FakeTeamDirectory::with_users(users()));
    let syncer = syncer(directory.clone(), true);
    let principal = user_resource(&users()[0]);
    let entitlement = member_entitlement(&role_resource(TeamRole::Devops));

    syncer
        .grant(&principal, &entitlement)
        .await
        .unwrap_or_else(|error| panic!("grant failed: {error}"));

    assert_eq!(
        directory.updates().await,
        vec![("u-1".to_owned(), TeamRole::Devops)]
    );

    let devops = syncer
        .grants(&role_resource(TeamRole::Devops), None)
        .await
        .unwrap_or_else(|error| panic!("grants failed: {error}"));
    let principals: Vec<&str> = devops
        .items
        .iter()
        .map(|grant| grant.principal.resource.as_str())
        .collect();
    assert_eq!(principals, vec!["u-1", "u-2"]);
}

#[tokio::test]
async fn grant_to_non_user_fails_without_api_call() {
    let directory = Arc::new(FakeTeamDirectory::with_users(users()));
    let syncer = syncer(directory.clone(), true);
    let principal = role_resource(TeamRole::Monitor);
    let entitlement = member_entitlement(&role_resource(TeamRole::Admin));

    let result = syncer.grant(&principal, &entitlement).await;

    assert!(matches!(result, Err(AppError::TypeMismatch(_))));
    assert!(directory.updates().await.is_empty());
    assert_eq!(directory.list_calls().await, 0);
}

#[tokio::test]
async fn revoke_resets_user_to_member() {
    let directory = Arc::new(FakeTeamDirectory::with_users(users()));
    let syncer = syncer(directory.clone(), true);
    let entitlement = member_entitlement(&role_resource(TeamRole::Admin));
    let grant = Grant::new(&entitlement, ResourceId::new("user", "u-1"));

    syncer
        .revoke(&grant)
        .await
        .unwrap_or_else(|error| panic!("revoke failed: {error}"));

    assert_eq!(
        directory.updates().await,
        vec![("u-1".to_owned(), TeamRole::Member)]
    );
}

#[tokio::test]
async fn revoke_for_non_user_fails_without_api_call() {
    let directory = Arc::new(FakeTeamDirectory::with_users(users()));
    let syncer = syncer(directory.clone(), true);
    let entitlement = member_entitlement(&role_resource(TeamRole::Admin));
    let grant = Grant::new(&entitlement, ResourceId::new("role", "monitor"));

    let result = syncer.revoke(&grant).await;

    assert!(matches!(result, Err(AppError::TypeMismatch(_))));
    assert!(directory.updates().await.is_empty());
}

#[tokio::test]
async fn write_back_is_rejected_when_provisioning_disabled() {
    let directory = Arc::new(FakeTeamDirectory::with_users(users()));
    let syncer = syncer(directory.clone(), false);
    let principal = user_resource(&users()[0]);
    let entitlement = member_entitlement(&role_resource(TeamRole::Devops));
    let grant = Grant::new(&entitlement, principal.id.clone());

    let granted = syncer.grant(&principal, &entitlement).await;
    let revoked = syncer.revoke(&grant).await;

    assert!(matches!(granted, Err(AppError::Unsupported(_))));
    assert!(matches!(revoked, Err(AppError::Unsupported(_))));
    assert!(directory.updates().await.is_empty());
}

#[tokio::test]
async fn principal_check_precedes_provisioning_check() {
    let syncer = syncer(Arc::new(FakeTeamDirectory::default()), false);
    let principal = role_resource(TeamRole::Monitor);
    let entitlement = member_entitlement(&role_resource(TeamRole::Admin));

    let result = syncer.grant(&principal, &entitlement).await;
    assert!(matches!(result, Err(AppError::TypeMismatch(_))));
}

#[tokio::test]
async fn grant_wraps_update_failures() {
    let syncer = syncer(Arc::new(FakeTeamDirectory::failing(404)), true);
    let principal = user_resource(&users()[0]);
    let entitlement = member_entitlement(&role_resource(TeamRole::Monitor));

    let error = match syncer.grant(&principal, &entitlement).await {
        Ok(()) => panic!("grant should fail"),
        Err(error) => error,
    };

    assert_eq!(error.status(), Some(404));
    assert!(
        error
            .to_string()
            .starts_with("cloudamqp-connector: failed to update user role")
    );
}
