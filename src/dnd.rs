// SPDX-License-Identifier: GPL-3.0

//! Drop ingestion: subtitles for the playing input, or media for the playlist.

use crate::error::IntfError;
use crate::platform::Platform;
use crate::player::{EsCategory, Media, PlayerController, PlaylistController};
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropActions(u8);

impl DropActions {
    pub const NONE: DropActions = DropActions(0);
    pub const COPY: DropActions = DropActions(0b001);
    pub const MOVE: DropActions = DropActions(0b010);
    pub const LINK: DropActions = DropActions(0b100);

    pub fn contains(self, other: DropActions) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The action reported back when the drop is accepted.
    pub fn preferred(self) -> Option<DropActions> {
        [Self::COPY, Self::MOVE, Self::LINK]
            .into_iter()
            .find(|action| self.contains(*action))
    }
}

impl std::ops::BitOr for DropActions {
    type Output = DropActions;

    fn bitor(self, rhs: Self) -> Self::Output {
        DropActions(self.0 | rhs.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DropPayload {
    pub urls: Vec<String>,
    pub text: Option<String>,
    pub possible_actions: DropActions,
}

impl DropPayload {
    pub fn urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
            text: None,
            possible_actions: DropActions::COPY | DropActions::MOVE | DropActions::LINK,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropOutcome {
    pub accepted: bool,
    pub action: Option<DropActions>,
}

impl DropOutcome {
    fn rejected() -> Self {
        Self::default()
    }

    fn accepted(actions: DropActions) -> Self {
        Self {
            accepted: true,
            action: actions.preferred(),
        }
    }
}

pub struct DropHandler<'a> {
    pub player: &'a dyn PlayerController,
    pub playlist: &'a dyn PlaylistController,
    pub platform: &'a dyn Platform,
}

impl DropHandler<'_> {
    pub fn drop_event_play(&self, payload: &DropPayload, start_playing: bool) -> DropOutcome {
        let actions = payload.possible_actions;
        if actions.preferred().is_none() {
            return DropOutcome::rejected();
        }

        if let [url] = payload.urls.as_slice()
            && self.player.has_input()
        {
            match self
                .player
                .add_associated_media(EsCategory::Subtitle, url, true, true, true)
            {
                Ok(()) => return DropOutcome::accepted(actions),
                Err(err) => log::debug!("{url} is not a subtitle: {err}"),
            }
        }

        let medias: Vec<Media> = if payload.urls.is_empty() {
            payload
                .text
                .as_deref()
                .and_then(text_as_mrl)
                .map(Media::new)
                .into_iter()
                .collect()
        } else {
            payload
                .urls
                .iter()
                .filter_map(|url| match self.to_mrl(url) {
                    Ok(mrl) => Some(Media::new(mrl)),
                    Err(err) => {
                        log::warn!("skipping dropped item: {err}");
                        None
                    }
                })
                .collect()
        };

        if medias.is_empty() {
            return DropOutcome::rejected();
        }

        log::info!("appending {} dropped media", medias.len());
        self.playlist.append(medias, start_playing);
        DropOutcome::accepted(actions)
    }

    fn to_mrl(&self, url: &str) -> Result<String, IntfError> {
        if self.platform.resolves_dropped_links()
            && let Some(path) = local_path(url)
            && let Some(resolved) = resolve_link(&path)
        {
            return url_to_mrl(&resolved);
        }
        url_to_mrl(url)
    }
}

/// Convert a dropped URL or local path into an MRL.
pub fn url_to_mrl(url: &str) -> Result<String, IntfError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(IntfError::DropIngest("empty url".to_string()));
    }

    // Single letter schemes are drive letters.
    if let Ok(parsed) = Url::parse(trimmed)
        && parsed.scheme().len() > 1
    {
        return Ok(parsed.to_string());
    }

    Url::from_file_path(trimmed)
        .map(|u| u.to_string())
        .map_err(|()| IntfError::DropIngest(format!("{trimmed:?} is neither a URL nor an absolute path")))
}

fn text_as_mrl(text: &str) -> Option<String> {
    let parsed = Url::parse(text.trim()).ok()?;
    (parsed.scheme().len() > 1).then(|| parsed.to_string())
}

fn local_path(url: &str) -> Option<PathBuf> {
    match Url::parse(url) {
        Ok(parsed) if parsed.scheme() == "file" => parsed.to_file_path().ok(),
        Ok(parsed) if parsed.scheme().len() > 1 => None,
        _ => Some(PathBuf::from(url)),
    }
}

/// Follow one symlink hop. An existing target comes back as an absolute path,
/// a dangling one verbatim.
fn resolve_link(path: &Path) -> Option<String> {
    let meta = std::fs::symlink_metadata(path).ok()?;
    if !meta.file_type().is_symlink() {
        return None;
    }

    let target = match std::fs::read_link(path) {
        Ok(target) => target,
        Err(err) => {
            log::warn!("cannot read link {}: {err}", path.display());
            return None;
        }
    };
    let absolute = match path.parent() {
        Some(parent) if target.is_relative() => parent.join(&target),
        _ => target.clone(),
    };

    if absolute.is_file() {
        Some(absolute.to_string_lossy().into_owned())
    } else {
        Some(target.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakePlatform, FakePlayer, FakePlaylist};

    fn handle(
        player: &FakePlayer,
        playlist: &FakePlaylist,
        platform: &FakePlatform,
        payload: &DropPayload,
        start: bool,
    ) -> DropOutcome {
        DropHandler {
            player,
            playlist,
            platform,
        }
        .drop_event_play(payload, start)
    }

    #[test]
    fn two_urls_are_appended_in_order() {
        let player = FakePlayer::default();
        let playlist = FakePlaylist::default();
        let payload = DropPayload::urls(["file:///a.mkv", "file:///b.mkv"]);

        let outcome = handle(&player, &playlist, &FakePlatform::default(), &payload, true);

        assert!(outcome.accepted);
        assert_eq!(outcome.action, Some(DropActions::COPY));
        assert_eq!(
            playlist.appended(),
            vec![(
                vec![Media::new("file:///a.mkv"), Media::new("file:///b.mkv")],
                true
            )]
        );
        assert!(player.associated().is_empty());
    }

    #[test]
    fn single_url_with_input_is_a_subtitle() {
        let player = FakePlayer::default();
        player.set_has_input(true);
        let playlist = FakePlaylist::default();
        let payload = DropPayload::urls(["file:///movie.srt"]);

        let outcome = handle(&player, &playlist, &FakePlatform::default(), &payload, true);

        assert!(outcome.accepted);
        assert!(playlist.appended().is_empty());
        assert_eq!(player.associated(), vec!["file:///movie.srt".to_string()]);
    }

    #[test]
    fn rejected_subtitle_falls_back_to_playlist() {
        let player = FakePlayer::default();
        player.set_has_input(true);
        player.refuse_associated_media();
        let playlist = FakePlaylist::default();
        let payload = DropPayload::urls(["file:///song.mp3"]);

        let outcome = handle(&player, &playlist, &FakePlatform::default(), &payload, false);

        assert!(outcome.accepted);
        assert_eq!(
            playlist.appended(),
            vec![(vec![Media::new("file:///song.mp3")], false)]
        );
    }

    #[test]
    fn no_acceptable_action_is_rejected() {
        let player = FakePlayer::default();
        let playlist = FakePlaylist::default();
        let mut payload = DropPayload::urls(["file:///a.mkv"]);
        payload.possible_actions = DropActions::NONE;

        let outcome = handle(&player, &playlist, &FakePlatform::default(), &payload, true);

        assert!(!outcome.accepted);
        assert!(playlist.appended().is_empty());
    }

    #[test]
    fn text_fallback() {
        let player = FakePlayer::default();
        let playlist = FakePlaylist::default();
        let mut payload = DropPayload::urls(Vec::<String>::new());
        payload.text = Some(" https://example.org/stream.m3u8 \n".to_string());

        let outcome = handle(&player, &playlist, &FakePlatform::default(), &payload, true);
        assert!(outcome.accepted);
        assert_eq!(
            playlist.appended(),
            vec![(vec![Media::new("https://example.org/stream.m3u8")], true)]
        );

        let playlist = FakePlaylist::default();
        payload.text = Some("just some words".to_string());
        let outcome = handle(&player, &playlist, &FakePlatform::default(), &payload, true);
        assert!(!outcome.accepted);
        assert!(playlist.appended().is_empty());
    }

    #[test]
    fn invalid_items_are_skipped() {
        let player = FakePlayer::default();
        let playlist = FakePlaylist::default();
        let payload = DropPayload::urls(["relative/path.mkv", "file:///ok.mkv"]);

        let outcome = handle(&player, &playlist, &FakePlatform::default(), &payload, true);
        assert!(outcome.accepted);
        assert_eq!(playlist.appended()[0].0, vec![Media::new("file:///ok.mkv")]);
    }

    #[test]
    fn absolute_paths_become_file_urls() {
        assert_eq!(url_to_mrl("/tmp/a b.mkv").unwrap(), "file:///tmp/a%20b.mkv");
        assert!(url_to_mrl("   ").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn links_are_resolved_one_hop() {
        let dir = crate::testing::temp_path("dnd-links");
        std::fs::create_dir_all(&dir).unwrap();
        let target = dir.join("target.mkv");
        std::fs::write(&target, b"").unwrap();
        let link = dir.join("link.mkv");
        let _ = std::fs::remove_file(&link);
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let dangling = dir.join("dangling");
        let _ = std::fs::remove_file(&dangling);
        std::os::unix::fs::symlink("https://example.org/x.mp4", &dangling).unwrap();
        let relative = dir.join("relative");
        let _ = std::fs::remove_file(&relative);
        std::os::unix::fs::symlink("missing.mkv", &relative).unwrap();

        let player = FakePlayer::default();
        let playlist = FakePlaylist::default();
        let platform = FakePlatform {
            resolve_links: true,
            ..FakePlatform::default()
        };
        let payload = DropPayload::urls([
            link.to_string_lossy().into_owned(),
            relative.to_string_lossy().into_owned(),
            dangling.to_string_lossy().into_owned(),
        ]);

        let outcome = handle(&player, &playlist, &platform, &payload, true);
        assert!(outcome.accepted);

        let expected_target = Url::from_file_path(&target).unwrap().to_string();
        assert_eq!(
            playlist.appended()[0].0,
            vec![
                Media::new(expected_target),
                Media::new("https://example.org/x.mp4")
            ]
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
