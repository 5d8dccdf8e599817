use serenity::model::gateway::{
    Activity,
    ActivityAssets,
    ActivityButton,
    ActivityParty,
    ActivityTimestamps,
    ActivityType,
};
use serenity::model::id::ApplicationId;

use model::{ActivityKind, PresencePayload};

fn activity_type(kind: ActivityKind) -> ActivityType {
    match kind {
        ActivityKind::Playing   => ActivityType::Playing,
        ActivityKind::Streaming => ActivityType::Streaming,
        ActivityKind::Listening => ActivityType::Listening,
        ActivityKind::Watching  => ActivityType::Watching,
        ActivityKind::Competing => ActivityType::Competing,
    }
}

/// Translate a built payload into the gateway activity shape.
pub fn to_activity(payload: &PresencePayload) -> Activity {
    // The streaming constructor is the only one that takes a url; everything
    // else starts from playing and gets its kind corrected after.
    let mut activity = match (payload.kind, &payload.url) {
        (ActivityKind::Streaming, Some(url)) => Activity::streaming(&payload.name, url),
        _ => Activity::playing(&payload.name),
    };
    activity.kind = activity_type(payload.kind);

    activity.application_id = payload.application_id.parse::<u64>().ok().map(ApplicationId);
    activity.details = payload.details.clone();
    activity.state = payload.state.clone();

    if payload.large_image.is_some() || payload.small_image.is_some() {
        activity.assets = Some(ActivityAssets {
            large_image: payload.large_image.clone(),
            large_text: payload.large_text.clone(),
            small_image: payload.small_image.clone(),
            small_text: payload.small_text.clone(),
        });
    }

    if let Some(party) = &payload.party {
        activity.party = Some(ActivityParty {
            id: Some(party.id.clone()),
            size: Some([party.current, party.max]),
        });
    }

    if let Some(start) = payload.start {
        activity.timestamps = Some(ActivityTimestamps {
            start: Some(start),
            end: None,
        });
    }

    activity.buttons = payload
        .buttons
        .iter()
        .map(|b| ActivityButton {
            label: b.label.clone(),
            url: b.url.clone(),
        })
        .collect();

    activity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> PresencePayload {
        PresencePayload {
            application_id: "123".to_string(),
            name: "Chess".to_string(),
            kind: ActivityKind::Watching,
            url: None,
            details: Some("ranked".to_string()),
            state: None,
            large_image: Some("board".to_string()),
            large_text: Some("A board".to_string()),
            small_image: None,
            small_text: None,
            buttons: Vec::new(),
            party: None,
            start: Some(1_700_000_000_000),
        }
    }

    #[test]
    fn kind_and_fields_carry_over() {
        let activity = to_activity(&payload());

        assert_eq!(activity.kind, ActivityType::Watching);
        assert_eq!(activity.name, "Chess");
        assert_eq!(activity.details.as_deref(), Some("ranked"));
        assert_eq!(activity.application_id, Some(ApplicationId(123)));

        let assets = activity.assets.unwrap();
        assert_eq!(assets.large_image.as_deref(), Some("board"));
        assert_eq!(assets.small_image, None);

        assert_eq!(activity.timestamps.unwrap().start, Some(1_700_000_000_000));
    }

    #[test]
    fn unparseable_application_id_is_left_unset() {
        let mut p = payload();
        p.application_id = "not-a-number".to_string();

        assert_eq!(to_activity(&p).application_id, None);
    }
}
