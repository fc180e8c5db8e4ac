use anyhow::Result;
use std::ffi::OsString;

use crate::util::config::{RequestConfig, ViewerConfig};

pub fn parse_args(cfg: &ViewerConfig) -> Result<RequestConfig> {
    parse_args_from(std::env::args_os().skip(1), cfg)
}

fn parse_args_from<I>(args: I, cfg: &ViewerConfig) -> Result<RequestConfig>
where
    I: IntoIterator<Item = OsString>,
{
    let mut request = RequestConfig::from_viewer_config(cfg);
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "--room" {
            let Some(value) = args.next() else {
                anyhow::bail!("--room expects a room id");
            };
            request.room_id = value.to_string_lossy().into_owned();
        } else if arg == "--max-stream" {
            let Some(value) = args.next() else {
                anyhow::bail!("--max-stream expects an integer");
            };
            let value = value.to_string_lossy();
            request.max_stream = Some(
                value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("invalid max stream: {value}"))?,
            );
        } else if arg == "--base-url" {
            let Some(value) = args.next() else {
                anyhow::bail!("--base-url expects a url");
            };
            request.base_url = value.to_string_lossy().into_owned();
        } else {
            anyhow::bail!("unknown argument: {arg:?} (expected --room, --max-stream, --base-url)");
        }
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn defaults_come_from_viewer_config() {
        let cfg = ViewerConfig::default();
        let request = parse_args_from(os(&[]), &cfg).expect("request parsed");

        assert_eq!(request.room_id, cfg.default_room_id);
        assert_eq!(request.base_url, cfg.base_url);
        assert_eq!(request.max_stream, None);
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = ViewerConfig::default();
        let request = parse_args_from(
            os(&["--room", "!r:example.org", "--max-stream", "4000"]),
            &cfg,
        )
        .expect("request parsed");

        assert_eq!(request.room_id, "!r:example.org");
        assert_eq!(request.max_stream, Some(4000));
    }

    #[test]
    fn rejects_non_numeric_max_stream() {
        let cfg = ViewerConfig::default();
        assert!(parse_args_from(os(&["--max-stream", "lots"]), &cfg).is_err());
    }

    #[test]
    fn rejects_unknown_arguments() {
        let cfg = ViewerConfig::default();
        assert!(parse_args_from(os(&["--rooms"]), &cfg).is_err());
    }
}
