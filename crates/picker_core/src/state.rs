use url::Url;

use crate::view_model::{AppViewModel, AttemptView, PickRowView, StatusCounts};
use crate::Effect;

pub type RowId = u64;

/// One line item to fulfill. Immutable once created; substitutes found by
/// the alternative lookup are new values, never mutations of this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedPart {
    /// Shop catalog element id. `None` means the part still needs resolution
    /// through the alternative lookup before it can be attempted.
    pub element_id: Option<String>,
    pub color_id: String,
    pub part_number: String,
    pub quantity: u32,
    pub name: Option<String>,
    pub color: Option<String>,
    pub locale: String,
}

/// Result of one page-agent attempt for one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptOutcome {
    pub part: RequestedPart,
    pub success: bool,
    pub bricks_added: Option<u32>,
    pub brick_not_found: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickStatus {
    InProgress,
    TryingToFindBrick,
    Success,
    Failed,
    Skipped,
}

impl PickStatus {
    /// Terminal rows accept no further attempts.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failed | Self::Skipped)
    }
}

/// Aggregate unit of work, one per original requested part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRow {
    /// The part as it appeared in the parts list, pre-substitution.
    pub specified: RequestedPart,
    /// Attempt outcomes in attempt order.
    pub outcomes: Vec<AttemptOutcome>,
    pub status: PickStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    /// All rows terminal; waiting for the page reload to complete.
    Finishing,
    Finished,
}

/// Cursor over the active row's candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveRow {
    row_id: RowId,
    candidates: Vec<RequestedPart>,
    /// Index of the next candidate to attempt.
    next: usize,
    /// Candidates came from the alternative lookup rather than the parts
    /// list; such candidates never trigger the not-found fallback.
    via_finder: bool,
    fallback_used: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: SessionState,
    queue: Vec<RequestedPart>,
    rows: Vec<PickRow>,
    active: Option<ActiveRow>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn view(&self) -> AppViewModel {
        let rows: Vec<PickRowView> = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| PickRowView {
                row_id: index as RowId,
                part_number: row.specified.part_number.clone(),
                name: row.specified.name.clone(),
                color: row.specified.color.clone(),
                quantity: row.specified.quantity,
                status: row.status,
                attempts: row
                    .outcomes
                    .iter()
                    .map(|outcome| AttemptView {
                        element_id: outcome.part.element_id.clone(),
                        success: outcome.success,
                        bricks_added: outcome.bricks_added,
                        brick_not_found: outcome.brick_not_found,
                    })
                    .collect(),
            })
            .collect();

        let mut counts = StatusCounts::default();
        for row in &self.rows {
            match row.status {
                PickStatus::Success => counts.success += 1,
                PickStatus::Failed => counts.failed += 1,
                PickStatus::Skipped => counts.skipped += 1,
                PickStatus::InProgress | PickStatus::TryingToFindBrick => counts.in_flight += 1,
            }
        }

        AppViewModel {
            session: self.session,
            total_parts: self.queue.len(),
            counts,
            rows,
            done: self.session == SessionState::Finished,
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn start_session(&mut self, parts: Vec<RequestedPart>) {
        self.session = SessionState::Running;
        self.queue = parts;
        self.dirty = true;
    }

    pub(crate) fn finish_session(&mut self) {
        if self.session == SessionState::Finishing {
            self.session = SessionState::Finished;
            self.dirty = true;
        }
    }

    /// Opens the next pending row and returns its initial effects. When the
    /// queue is exhausted, requests the page reload instead.
    pub(crate) fn open_next_row(&mut self) -> Vec<Effect> {
        let row_id = self.rows.len() as RowId;
        let Some(part) = self.queue.get(row_id as usize).cloned() else {
            self.active = None;
            self.session = SessionState::Finishing;
            self.dirty = true;
            return vec![Effect::ReloadPage];
        };

        self.rows.push(PickRow {
            specified: part.clone(),
            outcomes: Vec::new(),
            status: PickStatus::InProgress,
        });
        self.dirty = true;

        if part.element_id.is_none() {
            self.active = Some(ActiveRow {
                row_id,
                candidates: Vec::new(),
                next: 0,
                via_finder: true,
                fallback_used: false,
            });
            vec![Effect::FindAlternatives { row_id, part }]
        } else {
            self.active = Some(ActiveRow {
                row_id,
                candidates: vec![part],
                next: 0,
                via_finder: false,
                fallback_used: false,
            });
            self.attempt_next(row_id).into_iter().collect()
        }
    }

    /// Emits an attempt for the next unattempted candidate, if any.
    fn attempt_next(&mut self, row_id: RowId) -> Option<Effect> {
        let active = self.active.as_mut()?;
        let part = active.candidates.get(active.next)?.clone();
        active.next += 1;
        Some(Effect::AttemptPick { row_id, part })
    }

    pub(crate) fn apply_alternatives(
        &mut self,
        row_id: RowId,
        candidates: Vec<RequestedPart>,
    ) -> Vec<Effect> {
        let status = match self.active.as_ref() {
            Some(active) if active.row_id == row_id => self.rows[row_id as usize].status,
            _ => return Vec::new(),
        };

        match status {
            PickStatus::InProgress => {
                if candidates.is_empty() {
                    self.rows[row_id as usize].status = PickStatus::Skipped;
                    self.dirty = true;
                    return self.open_next_row();
                }
                if let Some(active) = self.active.as_mut() {
                    active.candidates = candidates;
                }
                self.attempt_next(row_id).into_iter().collect()
            }
            PickStatus::TryingToFindBrick => {
                if let Some(active) = self.active.as_mut() {
                    active.candidates.extend(candidates);
                }
                match self.attempt_next(row_id) {
                    Some(effect) => vec![effect],
                    None => {
                        self.rows[row_id as usize].status = PickStatus::Failed;
                        self.dirty = true;
                        self.open_next_row()
                    }
                }
            }
            // Terminal row; stale response.
            _ => Vec::new(),
        }
    }

    pub(crate) fn apply_attempt(&mut self, row_id: RowId, outcome: AttemptOutcome) -> Vec<Effect> {
        let (single_direct, fallback_used) = match self.active.as_ref() {
            Some(active) if active.row_id == row_id => (
                active.candidates.len() == 1 && !active.via_finder,
                active.fallback_used,
            ),
            _ => return Vec::new(),
        };

        let success = outcome.success;
        let not_found = outcome.brick_not_found;
        let row = &mut self.rows[row_id as usize];
        let first_attempt = row.outcomes.is_empty();
        row.outcomes.push(outcome);
        self.dirty = true;

        if success {
            self.rows[row_id as usize].status = PickStatus::Success;
            return self.open_next_row();
        }

        if not_found && first_attempt && single_direct && !fallback_used {
            self.rows[row_id as usize].status = PickStatus::TryingToFindBrick;
            let part = self.rows[row_id as usize].specified.clone();
            if let Some(active) = self.active.as_mut() {
                active.fallback_used = true;
            }
            return vec![Effect::FindAlternatives { row_id, part }];
        }

        match self.attempt_next(row_id) {
            Some(effect) => vec![effect],
            None => {
                self.rows[row_id as usize].status = PickStatus::Failed;
                self.open_next_row()
            }
        }
    }
}

/// Derives the shop locale tag from the picker page address: the first path
/// segment `en-us` becomes `en-US`.
pub fn locale_from_page_url(page_url: &str) -> Option<String> {
    let parsed = Url::parse(page_url).ok()?;
    let first = parsed.path_segments()?.next()?.to_owned();
    let mut parts = first.split('-');
    let language = parts.next()?;
    let region = parts.next()?;
    if language.is_empty() || region.is_empty() {
        return None;
    }
    Some(format!("{language}-{}", region.to_uppercase()))
}

/// True when the address points at the retailer's parts-picker page.
pub fn is_parts_picker_page(page_url: &str, host_suffix: &str, path_suffix: &str) -> bool {
    let Ok(parsed) = Url::parse(page_url) else {
        return false;
    };
    let host_ok = parsed
        .host_str()
        .is_some_and(|host| host.ends_with(host_suffix));
    host_ok && parsed.path().trim_end_matches('/').ends_with(path_suffix)
}

#[cfg(test)]
mod tests {
    use super::{is_parts_picker_page, locale_from_page_url};

    #[test]
    fn locale_uses_language_and_uppercased_region() {
        let locale = locale_from_page_url("https://www.lego.com/en-us/pick-and-build/pick-a-brick");
        assert_eq!(locale.as_deref(), Some("en-US"));
    }

    #[test]
    fn locale_missing_region_is_rejected() {
        assert_eq!(
            locale_from_page_url("https://www.lego.com/en/pick-and-build"),
            None
        );
        assert_eq!(locale_from_page_url("not a url"), None);
    }

    #[test]
    fn picker_page_guard_checks_host_and_path() {
        let url = "https://www.lego.com/en-us/pick-and-build/pick-a-brick";
        assert!(is_parts_picker_page(
            url,
            "lego.com",
            "pick-and-build/pick-a-brick"
        ));
        assert!(!is_parts_picker_page(
            "https://www.lego.com/en-us/themes",
            "lego.com",
            "pick-and-build/pick-a-brick"
        ));
        assert!(!is_parts_picker_page(
            "https://example.com/en-us/pick-and-build/pick-a-brick",
            "lego.com",
            "pick-and-build/pick-a-brick"
        ));
    }
}
