//! Project Chat Endpoints

use super::{ApiClient, ApiResult, Method, TokenStore, Transport};
use crate::models::{Message, MessageRequest};

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    /// History of one chat; `project_chat` gives the chat of a project
    pub async fn list_messages(&self, chat_id: u32) -> ApiResult<Vec<Message>> {
        self.get_json(format!("/api/messages/chat/{}", chat_id)).await
    }

    pub async fn send_message(&self, message: &MessageRequest) -> ApiResult<Message> {
        self.send_json(Method::POST, "/api/messages/send", message).await
    }
}
