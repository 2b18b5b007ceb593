/// WebSocket sessions for the dashboard
use actix::prelude::*;
use actix_web_actors::ws;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::messages::{ClientMessage, ServerMessage};
use crate::session::DashboardSession;
use crate::table::ListingTable;

/// How often heartbeat pings are sent
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
/// How long before lack of client response causes a timeout
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/// State shared by every connection: the cleaned table, read-only.
pub struct AppState {
    pub table: Arc<ListingTable>,
}

impl AppState {
    pub fn new(table: Arc<ListingTable>) -> Self {
        Self { table }
    }

    pub fn new_session(&self) -> DashboardSession {
        DashboardSession::new(Arc::clone(&self.table))
    }
}

/// One websocket connection, owning one dashboard session.
pub struct DashboardWebSocket {
    hb: Instant,
    session: DashboardSession,
}

impl DashboardWebSocket {
    pub fn new(state: actix_web::web::Data<AppState>) -> Self {
        Self {
            hb: Instant::now(),
            session: state.new_session(),
        }
    }

    fn hb(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.hb) > CLIENT_TIMEOUT {
                log::warn!("WebSocket client heartbeat failed, disconnecting");
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    fn send(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMessage) {
        match serde_json::to_string(msg) {
            Ok(text) => ctx.text(text),
            Err(e) => log::error!("Failed to encode server message: {}", e),
        }
    }

    fn handle_client_message(&mut self, msg: ClientMessage, ctx: &mut ws::WebsocketContext<Self>) {
        apply_client_message(&mut self.session, msg);
        let response = ServerMessage::Dashboard {
            snapshot: Box::new(self.session.snapshot()),
        };
        Self::send(ctx, &response);
    }
}

/// Apply one client message to a session's filter state.
pub fn apply_client_message(session: &mut DashboardSession, msg: ClientMessage) {
    match msg {
        ClientMessage::Snapshot => {}
        ClientMessage::SetPriceRange { min, max } => session.set_price_range(min, max),
        ClientMessage::SetSuperhost { superhost } => session.set_superhost(superhost),
        ClientMessage::SelectRoomType { room_type } => session.select_room_type(room_type),
        ClientMessage::SelectNeighborhood { neighborhood } => {
            session.select_neighborhood(neighborhood)
        }
        ClientMessage::SelectListing { listing_id } => session.select_listing(listing_id),
        ClientMessage::Reset => session.reset(),
    }
}

impl Actor for DashboardWebSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.hb(ctx);
        let initial = ServerMessage::Dashboard {
            snapshot: Box::new(self.session.snapshot()),
        };
        Self::send(ctx, &initial);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for DashboardWebSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                self.hb = Instant::now();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {
                self.hb = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.hb = Instant::now();
                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        self.handle_client_message(client_msg, ctx);
                    }
                    Err(e) => {
                        Self::send(
                            ctx,
                            &ServerMessage::Error {
                                message: format!("Invalid message format: {}", e),
                            },
                        );
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                log::warn!("Unexpected binary message");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            _ => ctx.stop(),
        }
    }
}
