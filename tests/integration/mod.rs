// Integration test cases for complete label selectors
//
// Real-world shaped selectors and label sets, used by the matcher,
// algebra and predicate tests.

/// Selectors as they appear in deployment tooling
pub const REAL_WORLD_SELECTORS: &[&str] = &[
    "environment in (production, qa), tier notin (frontend, backend), partition, !deprecated",
    "app.kubernetes.io/name = nginx, app.kubernetes.io/instance != canary",
    "region in (eu-west-1, eu-central-1), zone, !maintenance",
    "team = payments, cost-center, release notin (alpha, beta)",
    "owner = platform",
    "!quarantined",
    "",
];

/// Label sets as (name, value) pairs
pub const LABEL_SETS: &[&[(&str, &str)]] = &[
    &[],
    &[("environment", "production"), ("tier", "db"), ("partition", "a")],
    &[("environment", "qa"), ("tier", "frontend"), ("partition", "b")],
    &[("environment", "production"), ("partition", "c"), ("deprecated", "true")],
    &[
        ("app.kubernetes.io/name", "nginx"),
        ("app.kubernetes.io/instance", "main"),
    ],
    &[
        ("app.kubernetes.io/name", "nginx"),
        ("app.kubernetes.io/instance", "canary"),
    ],
    &[("region", "eu-west-1"), ("zone", "b")],
    &[("region", "us-east-1"), ("zone", "a")],
    &[("region", "eu-central-1"), ("zone", "c"), ("maintenance", "")],
    &[("team", "payments"), ("cost-center", "42"), ("release", "stable")],
    &[("team", "payments"), ("cost-center", "42"), ("release", "beta")],
    &[("owner", "platform"), ("quarantined", "yes")],
    &[("env", "x")],
];

/// The end-to-end scenario selector
pub const SCENARIO_SELECTOR: &str = "label1=value, label2=value, label3 in (value1,value2), \
     label4!=value, label5 notin (value1,value2), label6, !label7";

/// A label set the scenario selector accepts
pub const SCENARIO_MATCHING: &[(&str, &str)] = &[
    ("label1", "value"),
    ("label2", "value"),
    ("label3", "value1"),
    ("label4", "value1"),
    ("label5", "value"),
    ("label6", "value"),
];
