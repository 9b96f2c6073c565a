use super::*;
use crate::config::Config;
use crate::platform::Platform;
use crate::test_support::{FakeRunner, argv, exited};

fn linux() -> Platform {
    Platform::new("Linux", "5.15.0-105-generic")
}

fn dispatch_with(runner: &FakeRunner, config: Config, args: &[&str]) -> Result<i32> {
    let ctx = SetupContext::new(runner, config, linux());
    dispatch(&ctx, &argv(args))
}

fn dispatch_default(runner: &FakeRunner, args: &[&str]) -> Result<i32> {
    dispatch_with(runner, Config::default(), args)
}

fn ipv6_disabled() -> Config {
    Config {
        ipv6_enabled: false,
        ..Config::default()
    }
}

// ============================================================================
// classify
// ============================================================================

#[test]
fn classify_ip_add_variants() {
    for args in [
        &["ip", "link", "add", "spartan", "type", "dummy"][..],
        &["ip", "addr", "add", "198.51.100.1/32", "dev", "spartan"][..],
        &["ip", "-6", "addr", "add", "fd01:c::1/128", "dev", "spartan"][..],
    ] {
        assert_eq!(classify(&argv(args)), Route::IpAdd, "{:?}", args);
    }
}

#[test]
fn classify_other_ip_commands_as_passthrough() {
    assert_eq!(
        classify(&argv(&["ip", "link", "set", "spartan", "up"])),
        Route::Passthrough
    );
    assert_eq!(classify(&argv(&["ip", "link"])), Route::Passthrough);
}

#[test]
fn classify_iptables() {
    assert_eq!(
        classify(&argv(&["iptables", "--wait", "-A", "FORWARD", "-j", "ACCEPT"])),
        Route::Iptables
    );
}

#[test]
fn classify_ipv6_keeps_the_rest() {
    let args = argv(&["--ipv6", "ip", "-6", "addr", "add", "fd01:c::1/128"]);
    assert_eq!(classify(&args), Route::Ipv6(&args[1..]));
}

#[test]
fn classify_networkd_add_requires_exactly_one_path() {
    let args = argv(&["networkd", "add", "/opt/dcos/dcos.network"]);
    assert_eq!(classify(&args), Route::NetworkdAdd("/opt/dcos/dcos.network"));

    assert_eq!(
        classify(&argv(&["networkd", "add"])),
        Route::Passthrough
    );
    assert_eq!(
        classify(&argv(&["networkd", "add", "a.network", "b.network"])),
        Route::Passthrough
    );
}

#[test]
fn check_command_replaces_append_and_insert() {
    assert_eq!(
        check_command(&argv(&["iptables", "--wait", "-A", "FORWARD", "-j", "ACCEPT"])),
        argv(&["iptables", "--wait", "-C", "FORWARD", "-j", "ACCEPT"])
    );
    assert_eq!(
        check_command(&argv(&["iptables", "-t", "nat", "-I", "POSTROUTING", "1"])),
        argv(&["iptables", "-t", "nat", "-C", "POSTROUTING", "1"])
    );
}

// ============================================================================
// ip ... add
// ============================================================================

#[test]
fn ip_add_file_exists_is_success() {
    for args in [
        &["ip", "link", "add", "spartan", "type", "dummy"][..],
        &["ip", "addr", "add", "198.51.100.1/32", "dev", "spartan"][..],
        &["ip", "-6", "addr", "add", "fd01:c::1/128", "dev", "spartan"][..],
    ] {
        let runner =
            FakeRunner::new().then(exited(2).with_stderr(b"RTNETLINK answers: File exists\n"));

        assert_eq!(dispatch_default(&runner, args).unwrap(), 0, "{:?}", args);
        assert_eq!(runner.commands(), vec![argv(args)]);
        assert_eq!(runner.captures(), vec![Capture::Stderr]);
    }
}

#[test]
fn ip_add_other_failure_is_propagated() {
    let runner = FakeRunner::new().then(
        exited(2).with_stderr(b"RTNETLINK answers: Operation not permitted\n"),
    );

    let code = dispatch_default(&runner, &["ip", "link", "add", "spartan", "type", "dummy"]);

    assert_eq!(code.unwrap(), 2);
}

#[test]
fn ip_add_file_exists_must_be_trailing() {
    let runner = FakeRunner::new()
        .then(exited(1).with_stderr(b"File exists\nError: something else went wrong\n"));

    let code = dispatch_default(&runner, &["ip", "addr", "add", "198.51.100.1/32", "dev", "lo"]);

    assert_eq!(code.unwrap(), 1);
}

#[test]
fn ip_add_success_is_success() {
    let runner = FakeRunner::new().then(exited(0));
    let code = dispatch_default(&runner, &["ip", "link", "add", "spartan", "type", "dummy"]);
    assert_eq!(code.unwrap(), 0);
}

// ============================================================================
// iptables
// ============================================================================

#[test]
fn iptables_existing_rule_skips_mutation() {
    let runner = FakeRunner::new().then(exited(0));

    let code = dispatch_default(&runner, &["iptables", "--wait", "-A", "FORWARD", "-j", "ACCEPT"]);

    assert_eq!(code.unwrap(), 0);
    assert_eq!(
        runner.commands(),
        vec![argv(&["iptables", "--wait", "-C", "FORWARD", "-j", "ACCEPT"])]
    );
}

#[test]
fn iptables_missing_rule_runs_original_command() {
    let runner = FakeRunner::new().then(exited(1)).then(exited(0));

    let code = dispatch_default(&runner, &["iptables", "--wait", "-A", "FORWARD", "-j", "ACCEPT"]);

    assert_eq!(code.unwrap(), 0);
    assert_eq!(
        runner.commands(),
        vec![
            argv(&["iptables", "--wait", "-C", "FORWARD", "-j", "ACCEPT"]),
            argv(&["iptables", "--wait", "-A", "FORWARD", "-j", "ACCEPT"]),
        ]
    );
}

#[test]
fn iptables_mutation_failure_is_propagated() {
    let runner = FakeRunner::new().then(exited(1)).then(exited(4));

    let code = dispatch_default(&runner, &["iptables", "-I", "INPUT", "-j", "DROP"]);

    assert_eq!(code.unwrap(), 4);
}

#[test]
fn iptables_check_error_is_not_distinguished_from_missing_rule() {
    // Exit 2 is a syntax error, not an absent rule; the insert still runs.
    let runner = FakeRunner::new().then(exited(2)).then(exited(2));

    let code = dispatch_default(&runner, &["iptables", "-A", "NOSUCHCHAIN", "-j", "ACCEPT"]);

    assert_eq!(code.unwrap(), 2);
    assert_eq!(runner.commands().len(), 2);
}

// ============================================================================
// --ipv6
// ============================================================================

#[test]
fn ipv6_disabled_runs_nothing() {
    let runner = FakeRunner::new();

    let code = dispatch_with(
        &runner,
        ipv6_disabled(),
        &["--ipv6", "ip", "-6", "addr", "add", "fd01:c::1/128", "dev", "spartan"],
    );

    assert_eq!(code.unwrap(), 0);
    assert!(runner.commands().is_empty());
}

#[test]
fn ipv6_enabled_behaves_like_the_bare_command() {
    let args = ["ip", "-6", "addr", "add", "fd01:c::1/128", "dev", "spartan"];
    let prefixed: Vec<&str> = std::iter::once("--ipv6").chain(args).collect();

    let bare = FakeRunner::new().then(exited(2).with_stderr(b"RTNETLINK answers: File exists"));
    let wrapped =
        FakeRunner::new().then(exited(2).with_stderr(b"RTNETLINK answers: File exists"));

    let bare_code = dispatch_default(&bare, &args).unwrap();
    let wrapped_code = dispatch_default(&wrapped, &prefixed).unwrap();

    assert_eq!(bare_code, wrapped_code);
    assert_eq!(bare.commands(), wrapped.commands());
    assert_eq!(bare.captures(), wrapped.captures());
}

#[test]
fn ipv6_prefixed_ip6tables_passes_through() {
    let runner = FakeRunner::new().then(exited(0));

    let code = dispatch_default(
        &runner,
        &["--ipv6", "ip6tables", "--wait", "-A", "FORWARD", "-j", "ACCEPT"],
    );

    // ip6tables is not `iptables`, so it passes through unchanged.
    assert_eq!(code.unwrap(), 0);
    assert_eq!(
        runner.commands(),
        vec![argv(&["ip6tables", "--wait", "-A", "FORWARD", "-j", "ACCEPT"])]
    );
}

#[test]
fn repeated_ipv6_markers_are_all_stripped() {
    let runner = FakeRunner::new().then(exited(0));

    let code = dispatch_default(&runner, &["--ipv6", "--ipv6", "true"]);

    assert_eq!(code.unwrap(), 0);
    assert_eq!(runner.commands(), vec![argv(&["true"])]);
}

#[test]
fn ipv6_marker_alone_is_a_user_error() {
    let runner = FakeRunner::new();

    let err = dispatch_default(&runner, &["--ipv6"]).unwrap_err();

    assert!(matches!(err, SetupError::UserError(_)));
    assert!(runner.commands().is_empty());
}

// ============================================================================
// networkd add / passthrough
// ============================================================================

#[test]
fn networkd_add_off_coreos_does_nothing() {
    let runner = FakeRunner::new();

    let code = dispatch_default(&runner, &["networkd", "add", "/nonexistent/dcos.network"]);

    assert_eq!(code.unwrap(), 0);
    assert!(runner.commands().is_empty());
}

#[test]
fn unknown_command_passes_through_verbatim() {
    let runner = FakeRunner::new().then(exited(42));
    let args = ["sysctl", "-w", "net.ipv4.ip_forward=1"];

    let code = dispatch_default(&runner, &args);

    assert_eq!(code.unwrap(), 42);
    assert_eq!(runner.commands(), vec![argv(&args)]);
    assert_eq!(runner.captures(), vec![Capture::None]);
}

#[test]
fn networkd_with_wrong_arity_passes_through() {
    let runner = FakeRunner::new().then(exited(127));

    let code = dispatch_default(&runner, &["networkd", "add"]);

    assert_eq!(code.unwrap(), 127);
    assert_eq!(runner.commands(), vec![argv(&["networkd", "add"])]);
}

#[test]
fn empty_arguments_are_a_user_error() {
    let runner = FakeRunner::new();
    let err = dispatch_default(&runner, &[]).unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
}
