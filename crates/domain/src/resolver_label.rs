/// Display names for well-known public DoH resolvers, matched by URL substring.
static KNOWN_RESOLVERS: &[(&[&str], &str)] = &[
    (&["1.1.1.1", "1.0.0.1", "cloudflare"], "Cloudflare"),
    (&["8.8.8.8", "8.8.4.4", "dns.google"], "Google"),
    (&["adguard"], "AdGuard"),
    (&["yandex"], "Yandex"),
    (&["9.9.9.9", "quad9"], "Quad9"),
];

const SYSTEM_LABEL: &str = "System DNS";
const GENERIC_LABEL: &str = "DoH";

pub fn resolver_name(resolver_url: &str) -> &'static str {
    let url = resolver_url.trim();
    if url.is_empty() {
        return SYSTEM_LABEL;
    }

    let lowered = url.to_ascii_lowercase();
    KNOWN_RESOLVERS
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lowered.contains(n)))
        .map(|(_, name)| *name)
        .unwrap_or(GENERIC_LABEL)
}

/// Human-readable summary shown by the host, e.g. `Cloudflare • general`.
pub fn status_label(resolver_url: &str, strategy_id: &str) -> String {
    format!("{} • {}", resolver_name(resolver_url), strategy_id)
}
