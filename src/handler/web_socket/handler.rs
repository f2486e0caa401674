use std::time::{Duration, Instant};

use actix::{
  fut,
  Actor,
  ActorContext,
  ActorFutureExt,
  Addr,
  AsyncContext,
  ContextFutureSpawner,
  Handler,
  Running,
  StreamHandler,
  WrapFuture
};
use actix_web_actors::ws;

use super::Lobby::Lobby;
use super::WsMessage::{Connect, Disconnect, WsMessage};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/// One subscriber connection. Clients only listen; the server pushes change
/// events, so inbound text frames are ignored.
pub struct WsConn {
  session_id: String,
  rooms: Vec<String>,
  lobby_addr: Addr<Lobby>,
  hb: Instant,
}

impl WsConn {
  pub fn new(session_id: &str, rooms: Vec<String>, lobby_addr: Addr<Lobby>) -> Self {
    Self {
      session_id: session_id.to_string(),
      rooms,
      lobby_addr,
      hb: Instant::now(),
    }
  }

  fn hb(&self, ctx: &mut ws::WebsocketContext<Self>) {
    ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
      if Instant::now().duration_since(act.hb) > CLIENT_TIMEOUT {
        log::debug!("disconnecting stale subscriber {}", act.session_id);
        act.lobby_addr.do_send(Disconnect {
          session_id: act.session_id.clone(),
          rooms: act.rooms.clone(),
        });

        ctx.stop();
        return;
      }

      ctx.ping(b"PING");
    });
  }
}

impl Actor for WsConn {
  type Context = ws::WebsocketContext<Self>;

  fn started(&mut self, ctx: &mut Self::Context) {
    self.hb(ctx);

    let addr = ctx.address();
    self.lobby_addr.send(Connect {
      addr: addr.recipient(),
      rooms: self.rooms.clone(),
      session_id: self.session_id.clone(),
    })
    .into_actor(self)
    .then(|res, _act, ctx| {
      match res {
        Ok(_res) => (),
        _ => ctx.stop(),
      }
      fut::ready(())
    })
    .wait(ctx);
  }

  fn stopping(&mut self, _ctx: &mut Self::Context) -> Running {
    self.lobby_addr.do_send(Disconnect {
      session_id: self.session_id.clone(),
      rooms: self.rooms.clone(),
    });

    Running::Stop
  }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsConn {
  fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
    match msg {
      Ok(ws::Message::Ping(msg)) => {
        self.hb = Instant::now();
        ctx.pong(&msg);
      },
      Ok(ws::Message::Pong(_)) => {
        self.hb = Instant::now();
      },
      Ok(ws::Message::Close(reason)) => {
        ctx.close(reason);
        ctx.stop();
      },
      Ok(ws::Message::Text(_)) => (),
      Ok(ws::Message::Binary(_)) => (),
      Ok(ws::Message::Continuation(_)) => {
        ctx.stop();
      },
      Ok(ws::Message::Nop) => (),
      Err(error) => {
        log::error!("{:?}", error);
        ctx.stop();
      },
    }
  }
}

impl Handler<WsMessage> for WsConn {
  type Result = ();

  fn handle(&mut self, msg: WsMessage, ctx: &mut Self::Context) -> Self::Result {
    ctx.text(msg.0);
  }
}
