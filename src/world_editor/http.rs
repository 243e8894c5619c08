//! Client for the GDMC HTTP interface.

use super::{BuildArea, HeightMap, WorldInterface};
use crate::block_definitions::Block;
use crate::coordinate::Coord;
use crate::error::GenerationError;
use reqwest::blocking::{Client, ClientBuilder, Response};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "http://localhost:9000";

/// Blocks per `PUT /blocks` request.
const CHUNK_SIZE: usize = 4096;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildAreaResponse {
    x_from: i32,
    y_from: i32,
    z_from: i32,
    x_to: i32,
    y_to: i32,
    z_to: i32,
}

#[derive(Debug, Serialize)]
struct BlockPlacement<'a> {
    x: i32,
    y: i32,
    z: i32,
    id: String,
    state: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PlacementResult {
    status: i32,
    #[serde(default)]
    message: Option<String>,
}

pub struct GdmcClient {
    host: String,
    client: Client,
}

impl GdmcClient {
    pub fn new(host: &str) -> Result<Self, GenerationError> {
        let client: Client = ClientBuilder::new()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| GenerationError::Connection(e.to_string()))?;
        Ok(Self {
            host: host.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response, GenerationError> {
        self.client
            .get(self.url(path))
            .query(query)
            .send()
            .map_err(|e| GenerationError::Connection(format!("{}: {e}", self.url(path))))
    }
}

fn read_body(response: Response) -> Result<String, GenerationError> {
    let status = response.status();
    let body = response
        .text()
        .map_err(|e| GenerationError::Interface(e.to_string()))?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(GenerationError::Interface(format!(
            "Received response code {status}: {body}"
        )))
    }
}

fn parse_build_area(body: &str) -> Result<BuildArea, GenerationError> {
    let raw: BuildAreaResponse = serde_json::from_str(body)?;
    Ok(BuildArea::new(
        Coord::new(raw.x_from, raw.y_from, raw.z_from),
        Coord::new(raw.x_to, raw.y_to, raw.z_to),
    ))
}

fn encode_blocks(blocks: &[(Coord, Block)]) -> Result<String, GenerationError> {
    let placements: Vec<BlockPlacement> = blocks
        .iter()
        .map(|(p, block)| BlockPlacement {
            x: p.x,
            y: p.y,
            z: p.z,
            id: block.id(),
            state: &block.states,
            data: block.data.as_deref(),
        })
        .collect();
    Ok(serde_json::to_string(&placements)?)
}

/// Returns the refusal messages contained in a `PUT /blocks` response.
fn refused_placements(body: &str) -> Result<Vec<String>, GenerationError> {
    let results: Vec<PlacementResult> = serde_json::from_str(body)?;
    Ok(results
        .into_iter()
        .filter(|r| r.status == 0)
        .map(|r| r.message.unwrap_or_else(|| "unknown reason".to_string()))
        .collect())
}

impl WorldInterface for GdmcClient {
    fn check_connection(&mut self) -> Result<(), GenerationError> {
        let response = self.get("/version", &[])?;
        let version = read_body(response)?;
        log::info!("Connected to GDMC HTTP interface {}", version.trim());
        Ok(())
    }

    fn build_area(&mut self) -> Result<BuildArea, GenerationError> {
        let response = self.get("/buildarea", &[])?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GenerationError::NotConfigured(
                "the interface reports no build area".to_string(),
            ));
        }
        parse_build_area(&read_body(response)?)
    }

    fn heightmap(&mut self, area: &BuildArea) -> Result<HeightMap, GenerationError> {
        let response = self.get("/heightmap", &[("type", "MOTION_BLOCKING_NO_LEAVES")])?;
        let heights: Vec<Vec<i32>> = serde_json::from_str(&read_body(response)?)?;
        Ok(HeightMap::new(area.min.x, area.min.z, heights))
    }

    fn place_blocks(&mut self, blocks: &[(Coord, Block)]) -> Result<(), GenerationError> {
        for chunk in blocks.chunks(CHUNK_SIZE) {
            let response = self
                .client
                .put(self.url("/blocks"))
                .header("Content-Type", "application/json")
                .body(encode_blocks(chunk)?)
                .send()
                .map_err(|e| GenerationError::Connection(e.to_string()))?;

            for message in refused_placements(&read_body(response)?)? {
                log::warn!("Block placement refused: {message}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_definitions::sign_block;
    use crate::block_definitions::SignMount;

    #[test]
    fn test_parse_build_area() {
        let area = parse_build_area(
            r#"{"xFrom":100,"yFrom":-64,"zFrom":20,"xTo":0,"yTo":319,"zTo":120}"#,
        )
        .unwrap();
        assert_eq!(area.min, Coord::new(0, -64, 20));
        assert_eq!(area.max, Coord::new(100, 319, 120));
    }

    #[test]
    fn test_parse_build_area_rejects_garbage() {
        assert!(matches!(
            parse_build_area("<html>"),
            Err(GenerationError::Interface(_))
        ));
    }

    #[test]
    fn test_encode_blocks() {
        let sign = sign_block("birch", SignMount::Standing(4), ["NW", "", "", ""], "black", false);
        let body = encode_blocks(&[(Coord::new(1, 2, 3), sign)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value[0]["id"], "minecraft:birch_sign");
        assert_eq!(value[0]["state"]["rotation"], "4");
        assert_eq!(value[0]["x"], 1);
        assert!(value[0]["data"].as_str().unwrap().contains("front_text"));
    }

    #[test]
    fn test_refused_placements() {
        let refused =
            refused_placements(r#"[{"status":1},{"status":0,"message":"out of bounds"},{"status":0}]"#)
                .unwrap();
        assert_eq!(refused, vec!["out of bounds", "unknown reason"]);
    }

    #[test]
    fn test_host_trailing_slash() {
        let client = GdmcClient::new("http://localhost:9000/").unwrap();
        assert_eq!(client.host(), DEFAULT_HOST);
        assert_eq!(client.url("/blocks"), "http://localhost:9000/blocks");
    }
}
