//! Batch card generation: every rendered card becomes one entry of a zip
//! archive named after the member.

use crate::core::card::CardRenderer;
use crate::errors::AppResult;
use crate::models::Member;
use crate::utils::path::{card_file_name, underscore_spaces};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::io::{Seek, Write};
use tracing::info;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// `new_member_cards_2025-03-01.zip`
pub fn archive_file_name(day: NaiveDate) -> String {
    format!("new_member_cards_{}.zip", day.format("%Y-%m-%d"))
}

pub struct CardArchive<W: Write + Seek> {
    zip: ZipWriter<W>,
    names: HashSet<String>,
}

impl<W: Write + Seek> CardArchive<W> {
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            names: HashSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entry name for a member; a name already in the archive gets the
    /// member id appended.
    fn entry_name(&self, member: &Member) -> String {
        let name = card_file_name(&member.full_name);
        if !self.names.contains(&name) {
            return name;
        }
        format!(
            "{}_{}_card.png",
            underscore_spaces(&member.full_name),
            underscore_spaces(&member.member_id)
        )
    }

    /// Store one PNG, returning the entry name used.
    pub fn add(&mut self, member: &Member, png: &[u8]) -> AppResult<String> {
        let name = self.entry_name(member);

        // PNG data is already deflated
        let options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(CompressionMethod::Stored);
        self.zip.start_file(name.clone(), options)?;
        self.zip.write_all(png)?;

        self.names.insert(name.clone());
        Ok(name)
    }

    pub fn finish(self) -> AppResult<W> {
        Ok(self.zip.finish()?)
    }
}

/// Render a card for each member into a fresh archive written to
/// `writer`. Returns the writer and the entry names, in member order.
pub fn write_card_batch<W: Write + Seek>(
    renderer: &CardRenderer,
    members: &[Member],
    writer: W,
) -> AppResult<(W, Vec<String>)> {
    let mut archive = CardArchive::new(writer);
    let mut entries = Vec::with_capacity(members.len());

    for member in members {
        let png = renderer.render_png(member)?;
        entries.push(archive.add(member, &png)?);
    }

    info!(cards = entries.len(), "card archive written");
    Ok((archive.finish()?, entries))
}
