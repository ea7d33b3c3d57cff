//! Common test utilities for building step trees and sessions.
use authflow_graph::prelude::*;

/// The smallest tree with a branch and a backward jump.
///
/// `a` (identify) branches on email into `b` (verify), which jumps back to `a`.
#[allow(dead_code)]
pub fn create_jump_tree() -> Vec<Step> {
    vec![
        Step::new("identify")
            .with_uid("u-a")
            .with_id("a")
            .with_branch(
                Branch::identification("email")
                    .with_step(Step::new("verify").with_uid("u-b").with_id("b").with_target("a")),
            ),
    ]
}

/// `count` leaf steps named `step_0`, `step_1`, ... in a single list.
#[allow(dead_code)]
pub fn create_flat_steps(count: usize) -> Vec<Step> {
    (0..count)
        .map(|i| {
            Step::new("authenticate")
                .with_uid(format!("flat-{}", i))
                .with_name(format!("step_{}", i))
        })
        .collect()
}

/// A three-level tree exercising every kind of nesting.
///
/// ```text
/// step-0  identify  "root"
///   branch-0 phone
///     step-0  create_authenticator  -> root
///     step-1  verify                -> root
///     step-2  identify  "second"
///       branch-0 email
///         step-0  verify "deep"
///   branch-1 email (no steps)
///   branch-2 (no discriminator)
///     step-0  user_profile "profile"
/// step-1  authenticate "password"
/// ```
#[allow(dead_code)]
pub fn create_nested_tree() -> Vec<Step> {
    vec![
        Step::new("identify")
            .with_uid("n-root")
            .with_name("root")
            .with_branch(
                Branch::identification("phone")
                    .with_step(
                        Step::new("create_authenticator")
                            .with_uid("n-create")
                            .with_target("root")
                            .with_branch(Branch::authentication("primary_oob_otp_sms")),
                    )
                    .with_step(Step::new("verify").with_uid("n-verify").with_target("root"))
                    .with_step(
                        Step::new("identify")
                            .with_uid("n-second")
                            .with_name("second")
                            .with_branch(
                                Branch::identification("email").with_step(
                                    Step::new("verify").with_uid("n-deep").with_name("deep"),
                                ),
                            ),
                    ),
            )
            .with_branch(Branch::identification("email"))
            .with_branch(
                Branch::default()
                    .with_step(Step::new("user_profile").with_uid("n-profile").with_name("profile")),
            ),
        Step::new("authenticate")
            .with_uid("n-password")
            .with_name("password")
            .with_branch(Branch::authentication("primary_password")),
    ]
}

/// A configuration with a single login flow built from [`create_nested_tree`].
#[allow(dead_code)]
pub fn create_nested_config() -> AuthflowConfig {
    AuthflowConfig {
        login_flows: vec![Flow::with_steps("nested_login", create_nested_tree())],
        ..AuthflowConfig::default()
    }
}

/// A session over the bundled initial configuration with reproducible identifiers.
#[allow(dead_code)]
pub fn create_session() -> EditorSession {
    let config = authflow_graph::session::initial_config().expect("Initial config must parse");
    EditorSession::with_parts(config, IdentityAssigner::with_seed(7), LayoutEngine::new())
}

/// Node ids in layout order.
#[allow(dead_code)]
pub fn node_ids(graph: &Graph<'_>) -> Vec<String> {
    graph.nodes.iter().map(|n| n.id.clone()).collect()
}
