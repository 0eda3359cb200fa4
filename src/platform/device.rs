//! Audio output detection
//!
//! A label heuristic decides whether headphones look connected. Only the
//! music gate consults it; judgment and scoring never do.

/// Whether a private audio output (headphones, earbuds) is connected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputCapability {
    Available,
    Unavailable,
    /// Devices could not be listed or their labels are hidden
    #[default]
    Unknown,
}

const HEADPHONE_KEYWORDS: &[&str] = &[
    "headphone",
    "headset",
    "earphone",
    "earbud",
    "airpods",
    "bluetooth headphone",
    "bluetooth headset",
];

/// Classify a list of audio output labels.
///
/// Browsers hand out blank labels until media permission is granted, so a
/// list with no readable label is `Unknown` rather than `Unavailable`.
pub fn classify_output_labels<'a, I>(labels: I) -> OutputCapability
where
    I: IntoIterator<Item = &'a str>,
{
    let mut saw_label = false;
    for label in labels {
        let label = label.trim().to_lowercase();
        if label.is_empty() {
            continue;
        }
        saw_label = true;
        if HEADPHONE_KEYWORDS.iter().any(|k| label.contains(k)) {
            return OutputCapability::Available;
        }
    }

    if saw_label {
        OutputCapability::Unavailable
    } else {
        OutputCapability::Unknown
    }
}

/// Whether background music may play
pub fn music_allowed(capability: OutputCapability, require_headphones: bool) -> bool {
    !require_headphones || capability == OutputCapability::Available
}

/// List audio outputs through `navigator.mediaDevices` and classify them.
///
/// Labels are only exposed once media permission is granted, so a short
/// audio capture is requested (and stopped at once) before listing.
#[cfg(target_arch = "wasm32")]
pub async fn query_output_devices() -> OutputCapability {
    let devices = match web_sys::window().map(|w| w.navigator().media_devices()) {
        Some(Ok(devices)) => devices,
        Some(Err(e)) => {
            log::warn!("mediaDevices unavailable: {:?}", e);
            return OutputCapability::Unknown;
        }
        None => return OutputCapability::Unknown,
    };

    if let Err(e) = request_audio_permission(&devices).await {
        log::warn!("Audio permission not granted: {:?}", e);
        return OutputCapability::Unknown;
    }

    match enumerate_output_labels(&devices).await {
        Ok(labels) => {
            log::info!("Audio outputs: {:?}", labels);
            let capability = classify_output_labels(labels.iter().map(String::as_str));
            log::info!("Headphones: {:?}", capability);
            capability
        }
        Err(e) => {
            log::warn!("Could not list audio devices: {:?}", e);
            OutputCapability::Unknown
        }
    }
}

/// Constraints for the permission request: audio only
#[cfg(target_arch = "wasm32")]
fn audio_only_constraints() -> web_sys::MediaStreamConstraints {
    let constraints = web_sys::MediaStreamConstraints::new();
    constraints.set_audio(&wasm_bindgen::JsValue::TRUE);
    constraints
}

#[cfg(target_arch = "wasm32")]
async fn request_audio_permission(
    devices: &web_sys::MediaDevices,
) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;
    use web_sys::{MediaStream, MediaStreamTrack};

    let promise = devices.get_user_media_with_constraints(&audio_only_constraints())?;
    let stream: MediaStream = wasm_bindgen_futures::JsFuture::from(promise)
        .await?
        .dyn_into()?;

    // Only the permission is needed; release the microphone
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
async fn enumerate_output_labels(
    devices: &web_sys::MediaDevices,
) -> Result<Vec<String>, wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;
    use web_sys::{MediaDeviceInfo, MediaDeviceKind};

    let list = wasm_bindgen_futures::JsFuture::from(devices.enumerate_devices()?).await?;
    let list: js_sys::Array = list.dyn_into()?;

    Ok(list
        .iter()
        .filter_map(|d| d.dyn_into::<MediaDeviceInfo>().ok())
        .filter(|d| d.kind() == MediaDeviceKind::Audiooutput)
        .map(|d| d.label())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headphone_labels() {
        assert_eq!(
            classify_output_labels(["Built-in Speakers", "Jabra Headset (Bluetooth)"]),
            OutputCapability::Available
        );
        assert_eq!(
            classify_output_labels(["AirPods Pro"]),
            OutputCapability::Available
        );
    }

    #[test]
    fn test_speakers_only() {
        assert_eq!(
            classify_output_labels(["Built-in Speakers", "HDMI Output"]),
            OutputCapability::Unavailable
        );
    }

    #[test]
    fn test_hidden_labels_are_unknown() {
        assert_eq!(classify_output_labels(["", "  "]), OutputCapability::Unknown);
        assert_eq!(
            classify_output_labels(std::iter::empty()),
            OutputCapability::Unknown
        );
    }

    #[test]
    fn test_music_gate() {
        assert!(music_allowed(OutputCapability::Unknown, false));
        assert!(music_allowed(OutputCapability::Available, true));
        assert!(!music_allowed(OutputCapability::Unavailable, true));
        assert!(!music_allowed(OutputCapability::Unknown, true));
    }

    #[test]
    fn test_labels_after_permission_enable_music() {
        // Once permission is granted the same outputs report readable labels
        let hidden = classify_output_labels(["", "", ""]);
        assert!(!music_allowed(hidden, true));

        let granted = classify_output_labels(["Default", "MacBook Speakers", "AirPods"]);
        assert_eq!(granted, OutputCapability::Available);
        assert!(music_allowed(granted, true));
    }

    #[cfg(target_arch = "wasm32")]
    #[wasm_bindgen_test::wasm_bindgen_test]
    fn test_permission_request_asks_for_audio() {
        let constraints = audio_only_constraints();
        let audio = js_sys::Reflect::get(&constraints, &"audio".into()).unwrap();
        assert_eq!(audio.as_bool(), Some(true));
        let video = js_sys::Reflect::get(&constraints, &"video".into()).unwrap();
        assert!(video.is_undefined());
    }
}
