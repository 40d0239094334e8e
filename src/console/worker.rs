use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::client::error::ClientError;
use crate::client::transport::{Interpretation, ResultSet, Transport};

pub enum WorkRequest {
    Interpret { id: u64, command: String },
    FetchResults { id: u64, url: String },
}

pub enum WorkResponse {
    Interpreted {
        id: u64,
        command: String,
        outcome: Result<Interpretation, ClientError>,
    },
    ResultsFetched {
        id: u64,
        outcome: Result<ResultSet, ClientError>,
    },
}

/// Runs the transport on its own thread so the draw loop never blocks on
/// the network. Requests and responses flow over plain channels; the
/// worker exits when the request sender is dropped.
pub fn spawn(transport: Box<dyn Transport>) -> (Sender<WorkRequest>, Receiver<WorkResponse>) {
    let (request_tx, request_rx) = mpsc::channel::<WorkRequest>();
    let (response_tx, response_rx) = mpsc::channel::<WorkResponse>();

    thread::spawn(move || {
        while let Ok(request) = request_rx.recv() {
            let response = match request {
                WorkRequest::Interpret { id, command } => {
                    let outcome = transport.interpret(&command);
                    WorkResponse::Interpreted {
                        id,
                        command,
                        outcome,
                    }
                }
                WorkRequest::FetchResults { id, url } => WorkResponse::ResultsFetched {
                    id,
                    outcome: transport.fetch_results(&url),
                },
            };
            if response_tx.send(response).is_err() {
                break;
            }
        }
    });

    (request_tx, response_rx)
}
