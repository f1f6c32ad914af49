use std::path::Path;

use tabled::Table;

use crate::{
    Res, info,
    management::SnapshotManager,
    success,
    tidal::TidalApi,
    types::{
        Entry, EntryKind, RestoreOutcome, RestoreSnapshot, RestoreStatus, RestoreSummary,
        RestoreTableRow,
    },
    warning,
};

/// Re-adds every artist, track and album in the snapshot at `path` as a
/// favorite.
///
/// A failing add does not stop the run; it is recorded in the returned
/// summary. Playlist entries are counted but not restored, whatever their
/// shape, and any of the lists may be missing from the file. A missing or
/// malformed snapshot file aborts before any call is made.
pub async fn restore<A: TidalApi + ?Sized>(api: &A, path: &Path) -> Res<RestoreSummary> {
    let snapshot: RestoreSnapshot = SnapshotManager::read(path).await?;
    let summary = restore_snapshot(api, &snapshot).await;
    print_summary(&summary);
    Ok(summary)
}

pub async fn restore_snapshot<A: TidalApi + ?Sized>(
    api: &A,
    snapshot: &RestoreSnapshot,
) -> RestoreSummary {
    let mut summary = RestoreSummary {
        skipped_playlists: snapshot.playlists.len(),
        ..Default::default()
    };

    for entry in &snapshot.artists {
        let result = api.add_favorite_artist(&entry.id).await;
        summary.outcomes.push(outcome(EntryKind::Artist, entry, result));
    }

    for entry in &snapshot.tracks {
        let result = api.add_favorite_track(&entry.id).await;
        summary.outcomes.push(outcome(EntryKind::Track, entry, result));
    }

    for entry in &snapshot.albums {
        let result = api.add_favorite_album(&entry.id).await;
        summary.outcomes.push(outcome(EntryKind::Album, entry, result));
    }

    summary
}

fn outcome(kind: EntryKind, entry: &Entry, result: Res<()>) -> RestoreOutcome {
    let status = match result {
        Ok(()) => {
            success!("{} {} added as favorite", kind, entry.name);
            RestoreStatus::Added
        }
        Err(e) => RestoreStatus::Failed(e.to_string()),
    };

    RestoreOutcome {
        kind,
        entry: entry.clone(),
        status,
    }
}

fn print_summary(summary: &RestoreSummary) {
    let rows: Vec<RestoreTableRow> = [EntryKind::Artist, EntryKind::Track, EntryKind::Album]
        .into_iter()
        .map(|kind| RestoreTableRow {
            kind: kind.to_string(),
            added: summary.count(kind, true),
            failed: summary.count(kind, false),
        })
        .collect();
    println!("{}", Table::new(rows));

    for failed in summary.failed() {
        if let RestoreStatus::Failed(reason) = &failed.status {
            warning!(
                "{} {} ({}) not restored: {}",
                failed.kind,
                failed.entry.name,
                failed.entry.id,
                reason
            );
        }
    }

    if summary.skipped_playlists > 0 {
        info!(
            "{} playlists in the snapshot were not restored; restoring playlists is not supported",
            summary.skipped_playlists
        );
    }
}
