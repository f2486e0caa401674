use actix::prelude::{Message, Recipient};

/// Text frame pushed to a connected client.
#[derive(Message)]
#[rtype(result = "()")]
pub struct WsMessage(pub String);

#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub addr: Recipient<WsMessage>,
    pub rooms: Vec<String>,
    pub session_id: String,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub session_id: String,
    pub rooms: Vec<String>,
}

/// Single-item change notification delivered to everyone in a room.
#[derive(Message)]
#[rtype(result = "()")]
pub struct RoomBroadcast {
    pub room_id: String,
    pub msg: String,
}

impl RoomBroadcast {
    pub fn event(room_id: &str, payload: serde_json::Value) -> RoomBroadcast {
        RoomBroadcast {
            room_id: room_id.to_string(),
            msg: payload.to_string(),
        }
    }
}
