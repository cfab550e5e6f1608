use super::*;

fn anonymous() -> AuthSnapshot {
    AuthSnapshot {
        hydrated: true,
        role: None,
    }
}

fn signed_in(role: Role) -> AuthSnapshot {
    AuthSnapshot {
        hydrated: true,
        role: Some(role),
    }
}

fn all_known_roles() -> Vec<Role> {
    vec![
        Role::SuperAdmin,
        Role::CenterAdmin,
        Role::BranchAdmin,
        Role::Support,
        Role::Customer,
    ]
}

// =========================================================
// Hydration
// =========================================================

#[test]
fn no_decision_before_hydration() {
    let auth = AuthSnapshot {
        hydrated: false,
        role: None,
    };
    assert_eq!(decide("/admin/dashboard", &auth, false), GuardDecision::Pending);
    assert_eq!(decide("/", &auth, false), GuardDecision::Pending);
}

// =========================================================
// Anonymous users
// =========================================================

#[test]
fn anonymous_user_is_sent_to_login_from_protected_paths() {
    // unauthenticated visitors land on the login page
    assert_eq!(
        decide("/admin/dashboard", &anonymous(), false),
        GuardDecision::Redirect(LOGIN_PATH)
    );
    assert_eq!(
        decide("/customer/orders", &anonymous(), false),
        GuardDecision::Redirect(LOGIN_PATH)
    );
    assert_eq!(
        decide("/dashboard", &anonymous(), false),
        GuardDecision::Redirect(LOGIN_PATH)
    );
}

#[test]
fn anonymous_user_can_browse_public_pages() {
    for path in ["/", "/auth/login", "/pricing", "/help", "/acme"] {
        assert_eq!(decide(path, &anonymous(), false), GuardDecision::Allow, "path {}", path);
    }
}

// =========================================================
// Deny tables
// =========================================================

#[test]
fn every_denied_prefix_redirects_to_own_dashboard() {
    // property: for all roles R and prefixes P in R's deny list,
    // any path under P redirects to R's canonical dashboard
    for role in all_known_roles() {
        for prefix in denied_prefixes(&role) {
            let path = format!("{}/anything/nested", prefix);
            assert_eq!(
                decide(&path, &signed_in(role.clone()), false),
                GuardDecision::Redirect(role.dashboard_path()),
                "role {} path {}",
                role,
                path
            );
        }
    }
}

#[test]
fn customer_cannot_reach_admin_areas() {
    // customers bounce back to their own dashboard
    assert_eq!(
        decide("/admin/anything", &signed_in(Role::Customer), false),
        GuardDecision::Redirect("/customer/dashboard")
    );
}

#[test]
fn roles_can_reach_their_own_area() {
    assert_eq!(
        decide("/superadmin/tenants", &signed_in(Role::SuperAdmin), false),
        GuardDecision::Allow
    );
    assert_eq!(
        decide("/admin/branches", &signed_in(Role::CenterAdmin), false),
        GuardDecision::Allow
    );
    assert_eq!(
        decide("/customer/orders", &signed_in(Role::Customer), false),
        GuardDecision::Allow
    );
}

#[test]
fn prefix_matching_respects_segment_boundaries() {
    // "/administrator" is not under the "/admin" prefix
    assert_eq!(
        decide("/administrator", &signed_in(Role::Customer), false),
        GuardDecision::Allow
    );
}

// =========================================================
// Dashboard aliases and root path
// =========================================================

#[test]
fn generic_dashboard_redirects_to_role_dashboard() {
    for role in all_known_roles() {
        assert_eq!(
            decide("/dashboard", &signed_in(role.clone()), false),
            GuardDecision::Redirect(role.dashboard_path()),
            "role {}",
            role
        );
    }
}

#[test]
fn root_path_redirects_non_customers() {
    assert_eq!(
        decide("/", &signed_in(Role::Customer), false),
        GuardDecision::Allow
    );
    for role in [Role::SuperAdmin, Role::CenterAdmin, Role::Support] {
        assert_eq!(
            decide("/", &signed_in(role.clone()), false),
            GuardDecision::Redirect(role.dashboard_path()),
            "role {}",
            role
        );
    }
}

#[test]
fn tenant_landing_pages_follow_the_root_landing_rules() {
    // "/acme" is a customer-facing page like "/": privileged roles are
    // sent to their dashboard unless preview mode is on
    let admin = signed_in(Role::CenterAdmin);
    assert_eq!(
        decide("/acme", &admin, false),
        GuardDecision::Redirect("/admin/dashboard")
    );
    assert_eq!(decide("/acme", &admin, true), GuardDecision::Allow);

    assert_eq!(
        decide("/acme", &signed_in(Role::Customer), false),
        GuardDecision::Allow
    );
    assert_eq!(decide("/acme", &anonymous(), false), GuardDecision::Allow);
}

#[test]
fn authenticated_user_leaves_login_page() {
    assert_eq!(
        decide("/auth/login", &signed_in(Role::CenterAdmin), false),
        GuardDecision::Redirect("/admin/dashboard")
    );
}

// =========================================================
// Preview mode
// =========================================================

#[test]
fn preview_mode_relaxes_customer_paths_for_privileged_roles() {
    // with preview on, "/" renders; with preview off it redirects
    let admin = signed_in(Role::CenterAdmin);
    assert_eq!(decide("/", &admin, true), GuardDecision::Allow);
    assert_eq!(
        decide("/", &admin, false),
        GuardDecision::Redirect("/admin/dashboard")
    );

    assert_eq!(decide("/customer/orders", &admin, true), GuardDecision::Allow);
    assert_eq!(
        decide("/customer/orders", &admin, false),
        GuardDecision::Redirect("/admin/dashboard")
    );
}

#[test]
fn preview_covers_public_tenant_pages_too() {
    let support = signed_in(Role::Support);
    assert_eq!(
        decide("/pricing", &support, false),
        GuardDecision::Redirect("/staff/dashboard")
    );
    assert_eq!(decide("/pricing", &support, true), GuardDecision::Allow);
    assert_eq!(decide("/help", &support, true), GuardDecision::Allow);
}

#[test]
fn preview_mode_does_not_open_other_admin_areas() {
    // the relaxation is scoped to customer-facing paths only
    let admin = signed_in(Role::CenterAdmin);
    assert_eq!(
        decide("/superadmin/tenants", &admin, true),
        GuardDecision::Redirect("/admin/dashboard")
    );
}

#[test]
fn preview_flag_has_no_effect_for_customers() {
    assert_eq!(
        decide("/admin/anything", &signed_in(Role::Customer), true),
        GuardDecision::Redirect("/customer/dashboard")
    );
}

// =========================================================
// Unknown role (deny-all decision)
// =========================================================

#[test]
fn unknown_role_is_denied_everywhere() {
    let auth = signed_in(Role::Unknown("warehouse_bot".into()));
    for path in ["/", "/dashboard", "/admin/x", "/customer/x", "/pricing"] {
        assert_eq!(
            decide(path, &auth, false),
            GuardDecision::Redirect(LOGIN_PATH),
            "path {}",
            path
        );
    }
    // the login page stays reachable so the user can re-authenticate
    assert_eq!(decide("/auth/login", &auth, false), GuardDecision::Allow);
}
