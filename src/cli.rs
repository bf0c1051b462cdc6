use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tubedrop")]
#[command(author, version, about = "Telegram bot and CLI for downloading YouTube videos and audio", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (long polling)
    Run,

    /// Download a single video or audio track to a directory
    Download {
        /// Video URL
        url: String,

        /// Output directory (created if missing)
        #[arg(short, long, default_value = ".")]
        output: String,

        /// Maximum video height, e.g. 1080
        #[arg(long)]
        max_height: Option<u32>,

        /// Extract audio as mp3 instead of downloading video
        #[arg(long)]
        audio: bool,

        /// Directory or path of the ffmpeg binary
        #[arg(long)]
        ffmpeg_location: Option<String>,
    },

    /// Show video or playlist information
    Info {
        /// Video or playlist URL
        url: String,

        /// Print the parsed information as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update yt-dlp to the latest version
    UpdateYtdlp {
        /// Only print the installed version
        #[arg(long)]
        check: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["tubedrop"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_download_args() {
        let cli = Cli::try_parse_from([
            "tubedrop",
            "download",
            "https://youtu.be/abc",
            "-o",
            "/data",
            "--max-height",
            "1080",
            "--ffmpeg-location",
            "/opt/ffmpeg",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Download {
                url: "https://youtu.be/abc".into(),
                output: "/data".into(),
                max_height: Some(1080),
                audio: false,
                ffmpeg_location: Some("/opt/ffmpeg".into()),
            })
        );
    }

    #[test]
    fn test_download_defaults() {
        let cli = Cli::try_parse_from(["tubedrop", "download", "https://youtu.be/abc", "--audio"]).unwrap();
        match cli.command {
            Some(Commands::Download { output, audio, max_height, .. }) => {
                assert_eq!(output, ".");
                assert!(audio);
                assert_eq!(max_height, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_update_ytdlp_check() {
        let cli = Cli::try_parse_from(["tubedrop", "update-ytdlp", "--check"]).unwrap();
        assert_eq!(cli.command, Some(Commands::UpdateYtdlp { check: true }));
    }

    #[test]
    fn test_info_requires_url() {
        assert!(Cli::try_parse_from(["tubedrop", "info"]).is_err());
    }
}
