#![allow(dead_code)]

use image::{DynamicImage, Rgba, RgbaImage};
use mcstatus::{
    BedrockServer, Icon, IconSet, LegacyServer, ProtocolClient, Server, StatusErr, Target,
};
use std::{collections::HashMap, sync::Mutex, time::Duration};

pub fn solid_icon(color: [u8; 4]) -> Icon {
    Icon::from_image(&DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        8,
        8,
        Rgba(color),
    )))
    .unwrap()
}

pub fn java_icon() -> Icon {
    solid_icon([92, 140, 58, 255])
}

pub fn bedrock_icon() -> Icon {
    solid_icon([110, 110, 110, 255])
}

pub fn icons() -> IconSet {
    IconSet::create(java_icon(), bedrock_icon())
}

pub fn modern_server(favicon: Option<&Icon>) -> Server {
    let mut json = serde_json::json!({
        "version": {"name": "Paper 1.20.4", "protocol": 765},
        "players": {"max": 100, "online": 2, "sample": [
            {"name": "Notch", "id": "069a79f4-44e9-4726-a5be-fca90e38aaf5"},
            {"name": "jeb_", "id": "853c80ef-3c37-49fd-aa49-938b674adae6"}
        ]},
        "description": {"text": "§aWelcome", "extra": [{"text": " home"}]}
    });

    if let Some(icon) = favicon {
        json["favicon"] = icon.to_data_uri().into();
    }

    serde_json::from_value(json).unwrap()
}

pub fn legacy_server() -> LegacyServer {
    LegacyServer {
        protocol_version: Some(61),
        server_version: Some("1.5.2".into()),
        motd: "A Minecraft Server".into(),
        online_players: 3,
        max_players: 20,
    }
}

pub fn bedrock_server(extra: &[&str]) -> BedrockServer {
    BedrockServer {
        edition: "MCPE".into(),
        server_name: "Survival".into(),
        protocol_version: 527,
        version_name: "1.19.1".into(),
        online_players: 4,
        max_players: 30,
        server_id: "13253860892328930865".into(),
        extra: extra.iter().map(|x| x.to_string()).collect(),
    }
}

fn refused() -> StatusErr {
    StatusErr::IoErr(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    ))
}

/// Answers only the protocols it was given a reply for, recording every call.
#[derive(Default)]
pub struct FakeClient {
    pub modern: Option<Server>,
    pub netty: Option<LegacyServer>,
    pub legacy: Option<LegacyServer>,
    pub beta: Option<LegacyServer>,
    /// Bedrock replies by queried port.
    pub bedrock: HashMap<u16, BedrockServer>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeClient {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ProtocolClient for FakeClient {
    fn ping_modern(&self, _target: &Target, _timeout: Duration) -> Result<Server, StatusErr> {
        self.record("modern".into());
        self.modern.clone().ok_or_else(refused)
    }

    fn ping_netty(&self, _target: &Target, _timeout: Duration) -> Result<LegacyServer, StatusErr> {
        self.record("netty".into());
        self.netty.clone().ok_or_else(refused)
    }

    fn ping_legacy(&self, _target: &Target, _timeout: Duration) -> Result<LegacyServer, StatusErr> {
        self.record("legacy".into());
        self.legacy.clone().ok_or_else(refused)
    }

    fn ping_beta(&self, _target: &Target, _timeout: Duration) -> Result<LegacyServer, StatusErr> {
        self.record("beta".into());
        self.beta.clone().ok_or_else(refused)
    }

    fn query_bedrock(
        &self,
        _host: &str,
        port: u16,
        _timeout: Duration,
        _min_wait: Duration,
    ) -> Result<BedrockServer, StatusErr> {
        self.record(format!("bedrock:{}", port));
        self.bedrock.get(&port).cloned().ok_or_else(refused)
    }
}
