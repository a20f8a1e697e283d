use subgen::models::ConverterTarget;
use subgen::utils::match_user_agent;

#[test]
fn test_match_user_agent() {
    let cases = [
        ("ClashMetaForAndroid/2.8.9.Meta", Some(ConverterTarget::Clash)),
        ("clash-verge/v1.3.8", Some(ConverterTarget::Clash)),
        ("mihomo/1.18.0", Some(ConverterTarget::Clash)),
        ("Stash/2.4.7 Clash/1.9.0", Some(ConverterTarget::Clash)),
        ("SFA/1.8.0 (sing-box 1.8.0)", Some(ConverterTarget::SingBox)),
        ("SingBox/1.9", Some(ConverterTarget::SingBox)),
        ("v2rayN/6.23", None),
        ("Shadowrocket/1993 CFNetwork/1410.0.3 Darwin/22.6.0", None),
        ("", None),
    ];

    for (user_agent, expected) in cases {
        assert_eq!(match_user_agent(user_agent, None), expected, "{}", user_agent);
    }
}

#[test]
fn test_format_hint() {
    assert_eq!(
        match_user_agent("v2rayN/6.23", Some("clash")),
        Some(ConverterTarget::Clash)
    );
    assert_eq!(
        match_user_agent("ClashMetaForAndroid/2.8.9", Some("sing-box")),
        Some(ConverterTarget::SingBox)
    );
    // unknown hints fall back to the user agent
    assert_eq!(
        match_user_agent("mihomo/1.18.0", Some("base64")),
        Some(ConverterTarget::Clash)
    );
    assert_eq!(match_user_agent("v2rayN/6.23", Some("")), None);
}
