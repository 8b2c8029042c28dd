//! Optimistic mutations: the two operations that update local state before
//! the server answers. Edits, deletes, and reactions wait for their echo —
//! they are rare and the echo lands within a round trip.

use common::types::{channel_key, AttachmentInfo, ClientCommand, Message, Time};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::Client;

impl Client {
    /// append the message locally, clear the reply target, then transmit.
    /// returns the locally generated message id. the server does not echo
    /// sends back to the sender; if it ever does, the store replaces the
    /// local copy by id instead of duplicating it.
    pub fn send_message(
        &self,
        server_id: &str,
        channel: &str,
        content: &str,
        attachments: Vec<AttachmentInfo>,
    ) -> Result<Uuid> {
        if !self.store().connected() {
            return Err(Error::NotConnected);
        }
        let Some(nickname) = self.store().nickname() else {
            return Err(Error::NicknameUnknown);
        };

        let id = Uuid::new_v4();
        let reply_to = self.store().take_replying_to();
        let attachment_ids: Vec<String> = attachments.iter().map(|a| a.id.clone()).collect();

        let message = Message {
            id,
            from: nickname,
            content: content.to_owned(),
            timestamp: Time::now_utc(),
            edited_at: None,
            reply_to: reply_to.clone(),
            reactions: vec![],
            attachments,
            embeds: vec![],
        };
        self.store()
            .append_local_message(&channel_key(server_id, channel), message);

        self.send(ClientCommand::SendMessage {
            server_id: server_id.into(),
            channel: channel.into(),
            content: content.into(),
            reply_to: reply_to.map(|r| r.id),
            attachment_ids: (!attachment_ids.is_empty()).then_some(attachment_ids),
        })?;
        Ok(id)
    }

    /// tell the server and zero the local unread count without waiting
    pub fn mark_read(&self, server_id: &str, channel: &str, message_id: &str) -> Result<()> {
        self.send(ClientCommand::MarkRead {
            server_id: server_id.into(),
            channel: channel.into(),
            message_id: message_id.into(),
        })?;
        self.store().clear_unread(&channel_key(server_id, channel));
        Ok(())
    }
}
