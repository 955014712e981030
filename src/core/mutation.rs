//! Field-level merge of a partial mutation request into a ledger entry.
//!
//! Every field has its own rule with the [`FieldRule`] signature. A rule reads the
//! request and the draft (which still holds the previous values for every field not
//! yet visited) and returns the draft with its one field resolved. [`RULES`] fixes
//! the order; the first error aborts the merge and the draft is dropped.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::context::EngineContext;
use crate::domain::{Amount, LedgerEntry, MovementKind};
use crate::errors::MergeError;
use crate::utils::truncate_chars;

const LATITUDE_LIMIT: f64 = 90.0;

/// Partial update of a ledger entry. Absent fields keep their previous value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MutationRequest {
    pub kind: Option<MovementKind>,
    pub account_id: Option<Uuid>,
    pub amount: Option<Amount>,
    pub note: Option<String>,
    pub receiver_id: Option<Uuid>,
    pub asset_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub executed_at: Option<DateTime<Utc>>,
    pub photo: Option<String>,
}

impl MutationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: MovementKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn account(mut self, id: Uuid) -> Self {
        self.account_id = Some(id);
        self
    }

    pub fn amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn receiver(mut self, id: Uuid) -> Self {
        self.receiver_id = Some(id);
        self
    }

    pub fn asset(mut self, id: Uuid) -> Self {
        self.asset_id = Some(id);
        self
    }

    pub fn category(mut self, id: Uuid) -> Self {
        self.category_id = Some(id);
        self
    }

    pub fn location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn executed_at(mut self, at: DateTime<Utc>) -> Self {
        self.executed_at = Some(at);
        self
    }

    pub fn photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Entry under construction; required fields stay optional until the merge finishes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub id: Option<Uuid>,
    pub kind: Option<MovementKind>,
    pub account: Option<Uuid>,
    pub amount: Option<Amount>,
    pub note: String,
    pub receiver: Option<Uuid>,
    pub asset: Option<Uuid>,
    pub category: Option<Uuid>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub executed_at: Option<DateTime<Utc>>,
    pub photo: Option<String>,
    pub removed: bool,
}

impl From<&LedgerEntry> for Draft {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            id: Some(entry.id),
            kind: Some(entry.kind),
            account: Some(entry.account),
            amount: Some(entry.amount),
            note: entry.note.clone(),
            receiver: entry.receiver,
            asset: entry.asset,
            category: entry.category,
            latitude: entry.latitude,
            longitude: entry.longitude,
            executed_at: Some(entry.executed_at),
            photo: entry.photo.clone(),
            removed: entry.removed,
        }
    }
}

impl Draft {
    /// Seals the draft; a new entry gets a fresh id.
    pub fn into_entry(self) -> Result<LedgerEntry, MergeError> {
        Ok(LedgerEntry {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            account: self.account.ok_or(MergeError::AccountNotFound(None))?,
            receiver: self.receiver,
            asset: self.asset,
            category: self.category,
            kind: self.kind.ok_or(MergeError::MissingField("kind"))?,
            amount: self.amount.ok_or(MergeError::AmountMustBePositive)?,
            executed_at: self
                .executed_at
                .ok_or(MergeError::MissingField("executed_at"))?,
            note: self.note,
            latitude: self.latitude,
            longitude: self.longitude,
            photo: self.photo,
            removed: self.removed,
        })
    }
}

pub type FieldRule =
    fn(&EngineContext<'_>, &MutationRequest, Draft) -> Result<Draft, MergeError>;

/// The merge order. Later rules may depend on fields resolved by earlier ones.
pub const RULES: [(&str, FieldRule); 11] = [
    ("kind", resolve_kind),
    ("account", resolve_account),
    ("amount", resolve_amount),
    ("note", resolve_note),
    ("receiver", resolve_receiver),
    ("asset", resolve_asset),
    ("category", resolve_category),
    ("latitude", resolve_latitude),
    ("longitude", resolve_longitude),
    ("executed_at", resolve_executed_at),
    ("photo", resolve_photo),
];

/// Runs every rule in order against `previous` (or an empty draft when creating).
pub fn merge(
    ctx: &EngineContext<'_>,
    previous: Option<&LedgerEntry>,
    request: &MutationRequest,
) -> Result<LedgerEntry, MergeError> {
    let seed = previous.map(Draft::from).unwrap_or_default();
    let draft = RULES
        .iter()
        .try_fold(seed, |draft, (field, rule)| {
            rule(ctx, request, draft).map_err(|err| {
                tracing::debug!(field = *field, error = %err, "mutation rejected");
                err
            })
        })?;
    draft.into_entry()
}

pub fn resolve_kind(
    _ctx: &EngineContext<'_>,
    request: &MutationRequest,
    mut draft: Draft,
) -> Result<Draft, MergeError> {
    draft.kind = request.kind.or(draft.kind);
    if draft.kind.is_none() {
        return Err(MergeError::MissingField("kind"));
    }
    Ok(draft)
}

pub fn resolve_account(
    ctx: &EngineContext<'_>,
    request: &MutationRequest,
    mut draft: Draft,
) -> Result<Draft, MergeError> {
    if let Some(id) = request.account_id {
        let account = ctx
            .accounts
            .resolve_account(id)?
            .ok_or(MergeError::AccountNotFound(Some(id)))?;
        draft.account = Some(account.id);
    }
    if draft.account.is_none() {
        return Err(MergeError::AccountNotFound(None));
    }
    Ok(draft)
}

pub fn resolve_amount(
    _ctx: &EngineContext<'_>,
    request: &MutationRequest,
    mut draft: Draft,
) -> Result<Draft, MergeError> {
    draft.amount = request.amount.or(draft.amount);
    match draft.amount {
        Some(amount) if amount > Decimal::ZERO => Ok(draft),
        _ => Err(MergeError::AmountMustBePositive),
    }
}

pub fn resolve_note(
    ctx: &EngineContext<'_>,
    request: &MutationRequest,
    mut draft: Draft,
) -> Result<Draft, MergeError> {
    if let Some(note) = request.note.as_deref() {
        let max = ctx.config.max_note_chars;
        draft.note = truncate_chars(note, max);
        if draft.note.len() < note.len() {
            tracing::debug!(max_chars = max, "note truncated");
        }
    }
    Ok(draft)
}

pub fn resolve_receiver(
    ctx: &EngineContext<'_>,
    request: &MutationRequest,
    mut draft: Draft,
) -> Result<Draft, MergeError> {
    if !draft.kind.is_some_and(MovementKind::is_transfer) {
        draft.receiver = None;
        return Ok(draft);
    }
    if let Some(id) = request.receiver_id {
        let receiver = ctx
            .accounts
            .resolve_account(id)?
            .ok_or(MergeError::ReceiverNotFound(Some(id)))?;
        draft.receiver = Some(receiver.id);
    }
    if draft.receiver.is_none() {
        return Err(MergeError::ReceiverNotFound(None));
    }
    Ok(draft)
}

pub fn resolve_asset(
    ctx: &EngineContext<'_>,
    request: &MutationRequest,
    mut draft: Draft,
) -> Result<Draft, MergeError> {
    if let Some(id) = request.asset_id {
        let asset = ctx
            .assets
            .resolve_asset(id)?
            .ok_or(MergeError::AssetNotFound(id))?;
        draft.asset = Some(asset.id);
    }
    Ok(draft)
}

pub fn resolve_category(
    ctx: &EngineContext<'_>,
    request: &MutationRequest,
    mut draft: Draft,
) -> Result<Draft, MergeError> {
    if let Some(id) = request.category_id {
        let category = ctx
            .categories
            .resolve_category(id)?
            .ok_or(MergeError::CategoryNotFound(id))?;
        draft.category = Some(category.id);
    }
    Ok(draft)
}

pub fn resolve_latitude(
    _ctx: &EngineContext<'_>,
    request: &MutationRequest,
    mut draft: Draft,
) -> Result<Draft, MergeError> {
    match request.latitude {
        Some(lat) if (-LATITUDE_LIMIT..=LATITUDE_LIMIT).contains(&lat) => {
            draft.latitude = Some(lat);
        }
        Some(lat) => tracing::debug!(latitude = lat, "latitude out of range, discarded"),
        None => {}
    }
    Ok(draft)
}

pub fn resolve_longitude(
    ctx: &EngineContext<'_>,
    request: &MutationRequest,
    mut draft: Draft,
) -> Result<Draft, MergeError> {
    let bounds = ctx.config.longitude_bounds;
    match request.longitude {
        Some(lon) if bounds.accepts(lon) => draft.longitude = Some(lon),
        Some(lon) => tracing::debug!(longitude = lon, ?bounds, "longitude out of range, discarded"),
        None => {}
    }
    Ok(draft)
}

pub fn resolve_executed_at(
    ctx: &EngineContext<'_>,
    request: &MutationRequest,
    mut draft: Draft,
) -> Result<Draft, MergeError> {
    draft.executed_at = request
        .executed_at
        .or(draft.executed_at)
        .or_else(|| Some(ctx.clock.now()));
    Ok(draft)
}

pub fn resolve_photo(
    _ctx: &EngineContext<'_>,
    request: &MutationRequest,
    mut draft: Draft,
) -> Result<Draft, MergeError> {
    if let Some(photo) = request.photo.as_ref() {
        draft.photo = Some(photo.clone());
    }
    Ok(draft)
}
