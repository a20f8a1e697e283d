use crate::models::ConverterTarget;

/// User agent keywords of clients that want a converted configuration
/// rather than a base64 link list. Matched case-insensitively.
const CONVERTER_AGENTS: &[(&str, ConverterTarget)] = &[
    ("clash", ConverterTarget::Clash),
    ("mihomo", ConverterTarget::Clash),
    ("stash", ConverterTarget::Clash),
    ("sing-box", ConverterTarget::SingBox),
    ("singbox", ConverterTarget::SingBox),
];

/// Pick the converter target for a client, if any.
///
/// An explicit `format` hint wins over the user agent.
pub fn match_user_agent(user_agent: &str, format: Option<&str>) -> Option<ConverterTarget> {
    if let Some(target) = format.and_then(ConverterTarget::from_str) {
        return Some(target);
    }

    let user_agent = user_agent.to_lowercase();
    CONVERTER_AGENTS
        .iter()
        .find(|(keyword, _)| user_agent.contains(keyword))
        .map(|(_, target)| *target)
}
