// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn log_filter_defaults_and_overrides() {
    std::env::remove_var(LOG);
    assert_eq!(log_filter(), "info");

    std::env::set_var(LOG, "  ");
    assert_eq!(log_filter(), "info");

    std::env::set_var(LOG, "nbs_engine=debug,warn");
    assert_eq!(log_filter(), "nbs_engine=debug,warn");

    std::env::remove_var(LOG);
}
