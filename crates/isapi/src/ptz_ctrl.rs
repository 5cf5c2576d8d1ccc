//! Pan-tilt-zoom control under `ISAPI/PTZCtrl`.

use std::time::Duration;

use log::debug;
use reqwest::Method;

use crate::{Client, Error, ResponseFormat};

/// One movement as understood by the device.
///
/// Pan, tilt and zoom are signed speeds on a device defined scale, `0` meaning no motion on that
/// axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PtzCommand {
    pub pan: i32,
    pub tilt: i32,
    pub zoom: i32,
    /// Milliseconds until the movement is stopped, `0` to keep moving until told otherwise.
    pub duration_ms: u32,
    /// Keep moving until stopped, instead of performing one bounded move.
    pub continuous: bool,
}

impl PtzCommand {
    pub const STOP: Self = Self {
        pan: 0,
        tilt: 0,
        zoom: 0,
        duration_ms: 0,
        continuous: true,
    };

    pub fn is_stationary(&self) -> bool {
        self.pan == 0 && self.tilt == 0 && self.zoom == 0
    }
}

fn ptz_data(pan: i32, tilt: i32, zoom: i32, momentary_ms: Option<u32>) -> String {
    let mut s = String::from("<PTZData>");
    s.push_str(&format!("<pan>{pan}</pan><tilt>{tilt}</tilt><zoom>{zoom}</zoom>"));
    if let Some(duration) = momentary_ms {
        s.push_str(&format!("<Momentary><duration>{duration}</duration></Momentary>"));
    }
    s.push_str("</PTZData>");
    s
}

impl Client {
    /// Move the PTZ unit behind `channel`.
    ///
    /// Continuous commands with a non-zero duration are followed by an explicit stop once the
    /// duration has elapsed, so this may not return until then.
    pub async fn ptz_control(&self, channel: u32, command: PtzCommand) -> Result<(), Error> {
        let PtzCommand {
            pan,
            tilt,
            zoom,
            duration_ms,
            continuous,
        } = command;
        debug!("Sending {command:?} to channel {channel}");
        if !continuous {
            return self
                .put_ptz_data(channel, "momentary", ptz_data(pan, tilt, zoom, Some(duration_ms)))
                .await;
        }
        self.put_ptz_data(channel, "continuous", ptz_data(pan, tilt, zoom, None))
            .await?;
        if duration_ms > 0 && !command.is_stationary() {
            tokio::time::sleep(Duration::from_millis(duration_ms.into())).await;
            debug!("Stopping channel {channel} after {duration_ms}ms");
            self.put_ptz_data(channel, "continuous", ptz_data(0, 0, 0, None))
                .await?;
        }
        Ok(())
    }

    async fn put_ptz_data(&self, channel: u32, mode: &str, body: String) -> Result<(), Error> {
        self.request(
            Method::PUT,
            &format!("PTZCtrl/channels/{channel}/{mode}"),
            ResponseFormat::Xml,
            Some(body),
        )
        .await
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn continuous_body_has_no_duration() {
        assert_snapshot!(ptz_data(-70, 70, 0, None), @"<PTZData><pan>-70</pan><tilt>70</tilt><zoom>0</zoom></PTZData>");
    }

    #[test]
    fn momentary_body_carries_duration() {
        assert_snapshot!(ptz_data(50, 0, 0, Some(1000)), @"<PTZData><pan>50</pan><tilt>0</tilt><zoom>0</zoom><Momentary><duration>1000</duration></Momentary></PTZData>");
    }

    #[test]
    fn stop_is_stationary_and_continuous() {
        assert!(PtzCommand::STOP.is_stationary());
        assert!(PtzCommand::STOP.continuous);
        assert_eq!(PtzCommand::STOP.duration_ms, 0);
    }
}
