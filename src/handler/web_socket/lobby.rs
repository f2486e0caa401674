use std::collections::{HashMap, HashSet};

use actix::prelude::{Actor, Context, Handler, Recipient};

use super::message::{Connect, Disconnect, RoomBroadcast, WsMessage};

pub type Socket = Recipient<WsMessage>;

/// Registry of live subscriptions. Rooms map to the collections clients can
/// watch; delivery is fire-and-forget, one item at a time, no replay.
#[derive(Clone, Default)]
pub struct Lobby {
  pub sessions: HashMap<String, Socket>,
  pub rooms: HashMap<String, HashSet<String>>,
}

impl Lobby {
  fn send_message(&self, message: &str, send_to: &str) {
    if let Some(socket) = self.sessions.get(send_to) {
      let _ = socket.do_send(WsMessage(message.to_string()));
    }
  }
}

impl Actor for Lobby {
  type Context = Context<Self>;
}

impl Handler<Connect> for Lobby {
  type Result = ();

  fn handle(&mut self, connect: Connect, _ctx: &mut Self::Context) -> Self::Result {
    for room_id in &connect.rooms {
      self.rooms
        .entry(room_id.clone())
        .or_insert_with(HashSet::new)
        .insert(connect.session_id.clone());
    }

    self.sessions.insert(connect.session_id.clone(), connect.addr);
  }
}

impl Handler<Disconnect> for Lobby {
  type Result = ();

  fn handle(&mut self, disconnect: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
    if self.sessions.remove(&disconnect.session_id).is_none() {
      return;
    }

    for room_id in &disconnect.rooms {
      if let Some(room) = self.rooms.get_mut(room_id) {
        room.remove(&disconnect.session_id);

        if room.is_empty() {
          self.rooms.remove(room_id);
        }
      }
    }
  }
}

impl Handler<RoomBroadcast> for Lobby {
  type Result = ();

  fn handle(&mut self, broadcast: RoomBroadcast, _ctx: &mut Self::Context) -> Self::Result {
    let subscribers = match self.rooms.get(&broadcast.room_id) {
      Some(subscribers) => subscribers,
      None => return,
    };

    for session_id in subscribers.iter() {
      self.send_message(&broadcast.msg, session_id);
    }
  }
}
