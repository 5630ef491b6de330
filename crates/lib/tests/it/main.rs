/*! Integration tests for estate-session.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - gateway: register/login/logout flows through the identity gateway
 * - session: session synchronizer lifecycle against live boundaries
 * - guard: route guarding driven by session snapshots
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("estate_session=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod gateway;
mod guard;
mod helpers;
mod session;
