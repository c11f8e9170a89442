// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pretty printing of run summaries.

use std::borrow::Cow;

const VERTICAL: char = '│';
const UP_AND_RIGHT: char = '└';
const VERTICAL_AND_RIGHT: char = '├';

/// Collects blocks of lines under a title, then logs them as a tree at info
/// level, e.g.
///
/// ```text
/// Input cubes
/// ├ Q: q.fits
/// └ U: u.fits
/// ```
pub(crate) struct InfoPrinter {
    title: Cow<'static, str>,
    blocks: Vec<Vec<Cow<'static, str>>>,
}

impl InfoPrinter {
    pub(crate) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            blocks: vec![],
        }
    }

    pub(crate) fn push_line(&mut self, line: Cow<'static, str>) {
        self.blocks.push(vec![line]);
    }

    pub(crate) fn push_block(&mut self, block: Vec<Cow<'static, str>>) {
        self.blocks.push(block);
    }

    /// The lines to be logged, without the title.
    fn lines(&self) -> Vec<String> {
        let mut lines = vec![];
        let last_block = self.blocks.len().saturating_sub(1);
        for (i_block, block) in self.blocks.iter().enumerate() {
            for (i_line, line) in block.iter().enumerate() {
                let symbol = if i_line > 0 {
                    VERTICAL
                } else if i_block == last_block && block.len() == 1 {
                    UP_AND_RIGHT
                } else {
                    VERTICAL_AND_RIGHT
                };
                lines.push(format!("{symbol} {line}"));
            }
        }
        lines
    }

    pub(crate) fn display(self) {
        log::info!("{}", console::style(&self.title).bold());
        for line in self.lines() {
            log::info!("{line}");
        }
        log::info!("");
    }
}
