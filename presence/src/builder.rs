use chrono::Utc;

use model::{
    ActivityKind,
    PresenceButton,
    PresenceConfig,
    PresenceParty,
    PresencePayload,
};

use crate::controller::PresenceError;

/// Streaming activities need a stream URL; the card links here no matter
/// what, so one canonical placeholder is enough.
pub const STREAM_URL: &str = "https://www.twitch.tv/discord";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BuildOutcome {
    Activity(PresencePayload),
    Clear,
}

/// Assemble the activity for `config`. A disabled config means "clear",
/// which the caller performs. Pure transform, no I/O; the only
/// non-determinism is the start timestamp, stamped at this call.
pub fn build(config: &PresenceConfig, session_user_id: &str) -> Result<BuildOutcome, PresenceError> {
    if !config.enabled {
        return Ok(BuildOutcome::Clear);
    }

    let (application_id, name) = match (&config.application_id, &config.name) {
        (Some(a), Some(n)) => (a.clone(), n.clone()),
        _ => return Err(PresenceError::Validation("missing applicationId or name".to_string())),
    };

    let url = match config.activity_kind {
        ActivityKind::Streaming => Some(STREAM_URL.to_string()),
        _ => None,
    };

    // Captions only make sense on an image that is actually shown
    let large_image = config.large_image_key.clone();
    let large_text = match large_image {
        Some(_) => config.large_image_text.clone(),
        None => None,
    };
    let small_image = config.small_image_key.clone();
    let small_text = match small_image {
        Some(_) => config.small_image_text.clone(),
        None => None,
    };

    let mut buttons = Vec::new();
    if let (Some(label), Some(url)) = (&config.button1_text, &config.button1_url) {
        buttons.push(PresenceButton { label: label.clone(), url: url.clone() });
    }
    if let (Some(label), Some(url)) = (&config.button2_text, &config.button2_url) {
        buttons.push(PresenceButton { label: label.clone(), url: url.clone() });
    }

    let party = match (config.party_size, config.party_max) {
        (Some(current), Some(max)) if current > 0 && max > 0 => Some(PresenceParty {
            id: session_user_id.to_string(),
            current,
            max,
        }),
        _ => None,
    };

    let start = match config.start_timestamp {
        true => Some(Utc::now().timestamp_millis() as u64),
        false => None,
    };

    Ok(BuildOutcome::Activity(PresencePayload {
        application_id,
        name,
        kind: config.activity_kind,
        url,
        details: config.details.clone(),
        state: config.state.clone(),
        large_image,
        large_text,
        small_image,
        small_text,
        buttons,
        party,
        start,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> PresenceConfig {
        PresenceConfig {
            enabled: true,
            application_id: Some("123".to_string()),
            name: Some("Chess".to_string()),
            ..PresenceConfig::default()
        }
    }

    fn payload(outcome: BuildOutcome) -> PresencePayload {
        match outcome {
            BuildOutcome::Activity(p) => p,
            BuildOutcome::Clear => panic!("expected an activity, got a clear"),
        }
    }

    #[test]
    fn disabled_always_clears() {
        let config = PresenceConfig {
            enabled: false,
            ..base_config()
        };

        assert_eq!(build(&config, "99").unwrap(), BuildOutcome::Clear);
    }

    #[test]
    fn enabling_requires_application_id_and_name() {
        let config = PresenceConfig {
            name: None,
            ..base_config()
        };

        let err = build(&config, "99").unwrap_err();
        assert!(matches!(err, PresenceError::Validation(_)));
    }

    #[test]
    fn streaming_pins_the_placeholder_url() {
        let config = PresenceConfig {
            activity_kind: ActivityKind::Streaming,
            ..base_config()
        };

        let p = payload(build(&config, "99").unwrap());
        assert_eq!(p.url.as_deref(), Some(STREAM_URL));

        // and nothing else gets a url
        let p = payload(build(&base_config(), "99").unwrap());
        assert_eq!(p.url, None);
    }

    #[test]
    fn half_a_button_is_no_button() {
        let config = PresenceConfig {
            button1_text: Some("Play".to_string()),
            button2_text: Some("Docs".to_string()),
            button2_url: Some("https://y".to_string()),
            ..base_config()
        };

        let p = payload(build(&config, "99").unwrap());
        assert_eq!(p.buttons.len(), 1);
        assert_eq!(p.buttons[0].label, "Docs");
    }

    #[test]
    fn buttons_keep_declared_order() {
        let config = PresenceConfig {
            button1_text: Some("Play".to_string()),
            button1_url: Some("https://x".to_string()),
            button2_text: Some("Docs".to_string()),
            button2_url: Some("https://y".to_string()),
            ..base_config()
        };

        let p = payload(build(&config, "99").unwrap());
        let labels: Vec<_> = p.buttons.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Play", "Docs"]);
    }

    #[test]
    fn party_needs_both_counts() {
        let config = PresenceConfig {
            party_size: Some(5),
            party_max: None,
            ..base_config()
        };
        assert_eq!(payload(build(&config, "99").unwrap()).party, None);

        let config = PresenceConfig {
            party_size: Some(5),
            party_max: Some(10),
            ..base_config()
        };
        let party = payload(build(&config, "99").unwrap()).party.unwrap();
        assert_eq!((party.current, party.max), (5, 10));
        assert_eq!(party.id, "99");
    }

    #[test]
    fn zero_sized_party_is_dropped() {
        let config = PresenceConfig {
            party_size: Some(0),
            party_max: Some(10),
            ..base_config()
        };
        assert_eq!(payload(build(&config, "99").unwrap()).party, None);
    }

    #[test]
    fn caption_without_image_is_dropped() {
        let config = PresenceConfig {
            large_image_text: Some("A board".to_string()),
            small_image_key: Some("pawn".to_string()),
            small_image_text: Some("A pawn".to_string()),
            ..base_config()
        };

        let p = payload(build(&config, "99").unwrap());
        assert_eq!(p.large_image, None);
        assert_eq!(p.large_text, None);
        assert_eq!(p.small_image.as_deref(), Some("pawn"));
        assert_eq!(p.small_text.as_deref(), Some("A pawn"));
    }

    #[test]
    fn start_timestamp_is_stamped_at_build_time() {
        let config = PresenceConfig {
            start_timestamp: true,
            ..base_config()
        };

        let before = Utc::now().timestamp_millis() as u64;
        let p = payload(build(&config, "99").unwrap());
        let after = Utc::now().timestamp_millis() as u64;

        let start = p.start.unwrap();
        assert!(start >= before && start <= after);
    }

    #[test]
    fn full_scenario_record() {
        let config = PresenceConfig {
            enabled: true,
            application_id: Some("123".to_string()),
            activity_kind: ActivityKind::Playing,
            name: Some("Chess".to_string()),
            large_image_key: Some("board".to_string()),
            large_image_text: Some("A board".to_string()),
            button1_text: Some("Play".to_string()),
            button1_url: Some("https://x".to_string()),
            party_size: Some(2),
            party_max: Some(4),
            ..PresenceConfig::default()
        };

        let p = payload(build(&config, "42").unwrap());
        assert_eq!(p.name, "Chess");
        assert_eq!(p.large_image.as_deref(), Some("board"));
        assert_eq!(p.large_text.as_deref(), Some("A board"));
        assert_eq!(p.buttons, vec![PresenceButton {
            label: "Play".to_string(),
            url: "https://x".to_string(),
        }]);
        let party = p.party.unwrap();
        assert_eq!((party.current, party.max), (2, 4));
        assert_eq!(p.start, None);
    }
}
