// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The context association lists field (ANSI/VITA-49.2-2017 section 9.13.2).

Two size words followed by five back-to-back arrays of 32-bit stream
identifiers: source, system, vector-component, asynchronous-channel, and
(when enabled) one tag per asynchronous channel. The tag list shares the
asynchronous-channel count word — the standard gives it no count of its
own — so the setters here refuse tag lists whose length differs from the
channel list rather than guessing.

During unpack the size words are authoritative; during pack they are
derived from the owned list lengths.
*/

use deku::prelude::*;

use crate::VrtError;

/// Base context association lists structure.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContextAssociationLists {
    w1: u32,
    w2: u32,
    #[deku(count = "(w1 >> 16) & 0x1FF")]
    source_list: Vec<u32>,
    #[deku(count = "w1 & 0x1FF")]
    system_list: Vec<u32>,
    #[deku(count = "w2 >> 16")]
    vector_component_list: Vec<u32>,
    #[deku(count = "w2 & 0x7FFF")]
    async_channel_list: Vec<u32>,
    #[deku(cond = "w2 & (1 << 15) != 0", count = "w2 & 0x7FFF")]
    async_channel_tag_list: Vec<u32>,
}

impl ContextAssociationLists {
    /// Size of the lists field in 32-bit words.
    pub fn size_words(&self) -> u16 {
        (2 + self.source_list.len()
            + self.system_list.len()
            + self.vector_component_list.len()
            + self.async_channel_list.len()
            + self.async_channel_tag_list.len()) as u16
    }

    /// Gets the source association list.
    pub fn source_list(&self) -> &[u32] {
        &self.source_list
    }
    /// Sets the source association list (at most 511 entries).
    pub fn set_source_list(&mut self, list: Vec<u32>) -> Result<(), VrtError> {
        if list.len() > 0x1FF {
            return Err(VrtError::ListTooLong);
        }
        self.w1 = (self.w1 & !(0x1FF << 16)) | ((list.len() as u32) << 16);
        self.source_list = list;
        Ok(())
    }

    /// Gets the system association list.
    pub fn system_list(&self) -> &[u32] {
        &self.system_list
    }
    /// Sets the system association list (at most 511 entries).
    pub fn set_system_list(&mut self, list: Vec<u32>) -> Result<(), VrtError> {
        if list.len() > 0x1FF {
            return Err(VrtError::ListTooLong);
        }
        self.w1 = (self.w1 & !0x1FF) | (list.len() as u32);
        self.system_list = list;
        Ok(())
    }

    /// Gets the vector component association list.
    pub fn vector_component_list(&self) -> &[u32] {
        &self.vector_component_list
    }
    /// Sets the vector component association list (at most 65535 entries).
    pub fn set_vector_component_list(&mut self, list: Vec<u32>) -> Result<(), VrtError> {
        if list.len() > 0xFFFF {
            return Err(VrtError::ListTooLong);
        }
        self.w2 = (self.w2 & 0xFFFF) | ((list.len() as u32) << 16);
        self.vector_component_list = list;
        Ok(())
    }

    /// Gets the asynchronous channel association list.
    pub fn async_channel_list(&self) -> &[u32] {
        &self.async_channel_list
    }
    /// Gets the asynchronous channel tag list, or `None` when tags are not
    /// in use.
    pub fn async_channel_tag_list(&self) -> Option<&[u32]> {
        if self.w2 & (1 << 15) != 0 {
            Some(&self.async_channel_tag_list)
        } else {
            None
        }
    }
    /// Sets the asynchronous channel list and, optionally, one tag per
    /// channel (at most 32767 entries).
    ///
    /// # Errors
    /// Fails with [`VrtError::TagListLengthMismatch`] if a tag list of a
    /// different length than the channel list is supplied.
    pub fn set_async_channel_list(
        &mut self,
        channels: Vec<u32>,
        tags: Option<Vec<u32>>,
    ) -> Result<(), VrtError> {
        if channels.len() > 0x7FFF {
            return Err(VrtError::ListTooLong);
        }
        if let Some(t) = &tags {
            if t.len() != channels.len() {
                return Err(VrtError::TagListLengthMismatch);
            }
        }
        self.w2 = (self.w2 & !0xFFFF) | (channels.len() as u32);
        match tags {
            Some(t) => {
                self.w2 |= 1 << 15;
                self.async_channel_tag_list = t;
            }
            None => self.async_channel_tag_list = Vec::new(),
        }
        self.async_channel_list = channels;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_follow_lists() {
        let mut lists = ContextAssociationLists::default();
        lists.set_source_list(vec![1, 2, 3]).unwrap();
        lists.set_system_list(vec![4]).unwrap();
        lists.set_vector_component_list(vec![5, 6]).unwrap();
        lists
            .set_async_channel_list(vec![7, 8], Some(vec![9, 10]))
            .unwrap();
        assert_eq!(lists.w1, (3 << 16) | 1);
        assert_eq!(lists.w2, (2 << 16) | (1 << 15) | 2);
        assert_eq!(lists.size_words(), 2 + 3 + 1 + 2 + 2 + 2);
    }

    #[test]
    fn tag_list_must_match_channels() {
        let mut lists = ContextAssociationLists::default();
        let err = lists.set_async_channel_list(vec![1, 2], Some(vec![3]));
        assert!(matches!(err, Err(VrtError::TagListLengthMismatch)));
        lists.set_async_channel_list(vec![1, 2], None).unwrap();
        assert_eq!(lists.async_channel_tag_list(), None);
    }

    #[test]
    fn oversized_lists_rejected() {
        let mut lists = ContextAssociationLists::default();
        assert!(matches!(
            lists.set_source_list(vec![0; 512]),
            Err(VrtError::ListTooLong)
        ));
    }
}
