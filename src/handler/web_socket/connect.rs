use actix::Addr;
use actix_web::web::{Data, Payload, Query as WebQuery};
use actix_web::{Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::WsHandler::WsConn;
use crate::handler::web_socket::lobby::Lobby;
use crate::utils::response::Response;

/// Rooms a client may watch: the application collection, the settings
/// documents, and upload progress for the admin form.
const SUBSCRIBABLE_ROOMS: [&str; 3] = ["apps", "settings", "uploads"];

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Query {
    rooms: Option<String>,
}

pub async fn task(
  req: HttpRequest,
  stream: Payload,
  query: WebQuery<Query>,
  srv: Data<Addr<Lobby>>,
) -> Result<HttpResponse, Error> {
  let rooms = match parse_rooms(query.rooms.as_deref()) {
    Ok(rooms) => rooms,
    Err(error) => return Ok(Response::bad_request(&error)),
  };

  let session_id = Uuid::now_v7().to_string();

  let ws = WsConn::new(&session_id, rooms, srv.get_ref().clone());

  match ws::start(ws, &req, stream) {
    Ok(response) => Ok(response),
    Err(error) => {
      log::error!("{:?}", error);
      Ok(HttpResponse::InternalServerError().body(error.to_string()))
    },
  }
}

fn parse_rooms(raw: Option<&str>) -> Result<Vec<String>, String> {
  let raw = match raw {
    Some(raw) if !raw.trim().is_empty() => raw,
    _ => return Ok(vec!["apps".to_string()]),
  };

  let mut rooms = Vec::new();

  for room in raw.split(',') {
    let room = room.trim();

    if room.is_empty() {
      continue;
    }

    if !SUBSCRIBABLE_ROOMS.contains(&room) {
      return Err(format!("unknown room: {}", room));
    }

    if !rooms.contains(&room.to_string()) {
      rooms.push(room.to_string());
    }
  }

  if rooms.is_empty() {
    rooms.push("apps".to_string());
  }

  Ok(rooms)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_to_the_apps_room() {
    assert_eq!(parse_rooms(None).unwrap(), vec!["apps"]);
    assert_eq!(parse_rooms(Some("  ")).unwrap(), vec!["apps"]);
  }

  #[test]
  fn accepts_known_rooms_and_dedupes() {
    let rooms = parse_rooms(Some("apps, settings,apps,uploads")).unwrap();
    assert_eq!(rooms, vec!["apps", "settings", "uploads"]);
  }

  #[test]
  fn rejects_unknown_rooms() {
    let error = parse_rooms(Some("apps,secrets")).unwrap_err();
    assert_eq!(error, "unknown room: secrets");
  }
}
