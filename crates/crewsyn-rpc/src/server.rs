use std::io::{self, BufRead, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::str::FromStr;
use std::sync::Arc;

use crewsyn_core::{
    aggregate, find_best_duo, Archetype, Dimension, Member, Role, TeamSummary,
};
use crewsyn_narrative::{
    build_narrative_provider, duo_narrative, team_narrative, DuoNarrative, NarrativeProvider,
    NarrativeProviderConfig, OpenAiCompatibleConfig, TeamNarrative,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::protocol::{
    JsonRpcRequest, JsonRpcResponse, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
};

const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// Display ceiling for radar-chart points; visualization only, stats
/// themselves are unbounded.
const RADAR_FULL_MARK: f64 = 15.0;

pub struct SynergyServer {
    narrative: NarrativeRuntime,
}

/// Collaborator wiring resolved from the environment.
///
/// `config: None` means the collaborator is unreachable by design and
/// every narrative is the fixed fallback; the scoring surface keeps
/// working either way.
#[derive(Debug, Clone)]
struct NarrativeRuntime {
    config: Option<NarrativeProviderConfig>,
}

impl NarrativeRuntime {
    fn from_env() -> Self {
        let provider = std::env::var("CREWSYN_NARRATIVE_PROVIDER")
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_else(|_| "openai-compatible".to_string());
        if provider != "openai-compatible" {
            return Self::disabled();
        }

        let api_key = std::env::var("CREWSYN_NARRATIVE_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let Some(api_key) = api_key else {
            return Self::disabled();
        };

        let model = std::env::var("CREWSYN_NARRATIVE_MODEL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "gpt-4o-mini".to_string());
        let mut cfg = OpenAiCompatibleConfig::new(api_key, model);
        if let Ok(base_url) = std::env::var("CREWSYN_NARRATIVE_BASE_URL") {
            cfg.base_url = base_url;
        }

        Self {
            config: Some(NarrativeProviderConfig::OpenAiCompatible(cfg)),
        }
    }

    fn disabled() -> Self {
        Self { config: None }
    }

    fn provider(&self) -> Option<Arc<dyn NarrativeProvider>> {
        let cfg = self.config.clone()?;
        build_narrative_provider(cfg).ok()
    }

    fn team(&self, members: &[Member], summary: &TeamSummary) -> TeamNarrative {
        self.provider()
            .and_then(|provider| {
                let rt = tokio::runtime::Runtime::new().ok()?;
                Some(rt.block_on(team_narrative(provider.as_ref(), members, summary)))
            })
            .unwrap_or_else(TeamNarrative::fallback)
    }

    fn duo(&self, first: &Member, second: &Member) -> DuoNarrative {
        self.provider()
            .and_then(|provider| {
                let rt = tokio::runtime::Runtime::new().ok()?;
                Some(rt.block_on(duo_narrative(provider.as_ref(), first, second)))
            })
            .unwrap_or_else(|| DuoNarrative::fallback(&first.name, &second.name))
    }
}

impl SynergyServer {
    pub fn new() -> Self {
        Self {
            narrative: NarrativeRuntime::from_env(),
        }
    }

    /// Server with the collaborator switched off; narratives are always
    /// the fixed fallbacks. Used by tests and offline deployments.
    pub fn without_narrative() -> Self {
        Self {
            narrative: NarrativeRuntime::disabled(),
        }
    }

    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(Value::Null),
                INVALID_REQUEST,
                "invalid jsonrpc version",
            ));
        }

        let is_notification = request.id.is_none();
        let id = request.id.clone().unwrap_or(Value::Null);

        if is_notification && request.method == "notifications/initialized" {
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => {
                let protocol_version = request
                    .params
                    .get("protocolVersion")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_PROTOCOL_VERSION);
                JsonRpcResponse::success(
                    id,
                    json!({
                        "protocolVersion": protocol_version,
                        "serverInfo": {"name": "crewsyn-rpc", "version": "0.1.0"},
                        "capabilities": {
                            "tools": {
                                "listChanged": false
                            }
                        }
                    }),
                )
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, self.tools_list_result()),
            "tools/call" => self.handle_tools_call(id, &request.params),
            _ => JsonRpcResponse::error(id, METHOD_NOT_FOUND, "method not found"),
        };

        Some(response)
    }

    fn tools_list_result(&self) -> Value {
        json!({
            "tools": [
                {
                    "name": "team_stats",
                    "description": "Average a team's attribute vectors, grade the team, and return radar points",
                    "inputSchema": members_schema(0),
                },
                {
                    "name": "team_analyze",
                    "description": "Team stats plus a generated persona, strengths, and improvements",
                    "inputSchema": members_schema(1),
                },
                {
                    "name": "duo_recommend",
                    "description": "Find the best duo by synergy score and generate a chemistry note and mission",
                    "inputSchema": members_schema(2),
                },
            ]
        })
    }

    fn handle_tools_call(&self, id: Value, params: &Value) -> JsonRpcResponse {
        let name = params.get("name").and_then(Value::as_str).unwrap_or_default();
        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        match name {
            "team_stats" => self.tool_team_stats(id, &arguments),
            "team_analyze" => self.tool_team_analyze(id, &arguments),
            "duo_recommend" => self.tool_duo_recommend(id, &arguments),
            _ => JsonRpcResponse::invalid_params(id, format!("unknown tool: {name}")),
        }
    }

    fn tool_team_stats(&self, id: Value, arguments: &Value) -> JsonRpcResponse {
        let members = match parse_members(arguments) {
            Ok(v) => v,
            Err(msg) => return JsonRpcResponse::invalid_params(id, msg),
        };
        let summary = aggregate(&members);
        let text = format!(
            "team of {} graded {} (overall {})",
            summary.team_size, summary.grade, summary.overall
        );
        let payload = json!({
            "team_size": summary.team_size,
            "average": summary.average,
            "overall": summary.overall,
            "grade": summary.grade,
            "radar": radar_points(&summary),
        });
        tool_result(id, text, payload)
    }

    fn tool_team_analyze(&self, id: Value, arguments: &Value) -> JsonRpcResponse {
        let members = match parse_members(arguments) {
            Ok(v) => v,
            Err(msg) => return JsonRpcResponse::invalid_params(id, msg),
        };
        if members.is_empty() {
            return JsonRpcResponse::invalid_params(id, "team analysis requires at least 1 member");
        }

        let summary = aggregate(&members);
        let narrative = self.narrative.team(&members, &summary);
        let text = format!("\"{}\" graded {}", narrative.persona, summary.grade);
        let payload = json!({
            "team_size": summary.team_size,
            "average": summary.average,
            "overall": summary.overall,
            "grade": summary.grade,
            "persona": narrative.persona,
            "strengths": narrative.strengths,
            "improvements": narrative.improvements,
        });
        tool_result(id, text, payload)
    }

    fn tool_duo_recommend(&self, id: Value, arguments: &Value) -> JsonRpcResponse {
        let members = match parse_members(arguments) {
            Ok(v) => v,
            Err(msg) => return JsonRpcResponse::invalid_params(id, msg),
        };
        let duo = match find_best_duo(&members) {
            Ok(v) => v,
            Err(err) => return JsonRpcResponse::invalid_params(id, err.to_string()),
        };

        let narrative = self.narrative.duo(&duo.first, &duo.second);
        let text = format!(
            "best duo: {} + {} (score {})",
            duo.first.name, duo.second.name, duo.synergy_score
        );
        let payload = json!({
            "duo": [duo.first, duo.second],
            "synergy_score": duo.synergy_score,
            "synergy_reason": narrative.synergy_reason,
            "mission": narrative.mission,
        });
        tool_result(id, text, payload)
    }

    pub fn serve_stdio(&self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut reader = io::BufReader::new(stdin.lock());
        let mut stdout = io::stdout();
        let mut line = String::new();

        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str(trimmed) {
                Ok(v) => v,
                Err(err) => {
                    let response = JsonRpcResponse::error(
                        Value::Null,
                        PARSE_ERROR,
                        format!("parse error: {err}"),
                    );
                    write_line_response(&mut stdout, &response)?;
                    continue;
                }
            };

            if let Some(response) = self.handle_request(request) {
                write_line_response(&mut stdout, &response)?;
            }
        }

        Ok(())
    }

    pub fn serve_http(&self, addr: &str) -> io::Result<()> {
        let listener = TcpListener::bind(addr)?;
        eprintln!("crewsyn-rpc http listening on {}", listener.local_addr()?);
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Err(err) = self.handle_http_connection(stream) {
                        eprintln!("crewsyn-rpc http request error: {err}");
                    }
                }
                Err(err) => {
                    eprintln!("crewsyn-rpc http accept error: {err}");
                }
            }
        }
        Ok(())
    }

    fn handle_http_connection(&self, mut stream: TcpStream) -> io::Result<()> {
        let reader_stream = stream.try_clone()?;
        let Some(body) = read_http_post_body(&reader_stream)? else {
            return write_http_response(
                &mut stream,
                "405 Method Not Allowed",
                "{\"error\":\"POST required\"}",
            );
        };

        let reply = match serde_json::from_slice::<JsonRpcRequest>(&body) {
            Ok(request) => self.handle_request(request),
            Err(err) => Some(JsonRpcResponse::error(
                Value::Null,
                PARSE_ERROR,
                format!("parse error: {err}"),
            )),
        };

        let body = match reply {
            Some(response) => serde_json::to_string(&response)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
            None => String::from("{}"),
        };
        write_http_response(&mut stream, "200 OK", &body)
    }
}

impl Default for SynergyServer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct MemberArg {
    #[serde(default)]
    id: Option<String>,
    name: String,
    archetype: String,
    role: String,
}

/// Thin validation: slugs must parse against the closed sets, names
/// must be non-empty; ids default to payload order.
fn parse_members(arguments: &Value) -> Result<Vec<Member>, String> {
    let raw = arguments
        .get("members")
        .cloned()
        .ok_or_else(|| "members array is required".to_string())?;
    let specs: Vec<MemberArg> =
        serde_json::from_value(raw).map_err(|e| format!("invalid members payload: {e}"))?;

    let mut members = Vec::with_capacity(specs.len());
    for (index, spec) in specs.into_iter().enumerate() {
        if spec.name.trim().is_empty() {
            return Err(format!("member {} has an empty name", index + 1));
        }
        let archetype = Archetype::from_str(&spec.archetype).map_err(|e| e.to_string())?;
        let role = Role::from_str(&spec.role).map_err(|e| e.to_string())?;
        let id = spec
            .id
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| format!("m{}", index + 1));
        members.push(Member::new(id, spec.name, archetype, role));
    }
    Ok(members)
}

fn radar_points(summary: &TeamSummary) -> Value {
    Value::Array(
        Dimension::ALL
            .iter()
            .map(|d| {
                json!({
                    "axis": d.label(),
                    "value": summary.average.get(*d),
                    "full_mark": RADAR_FULL_MARK,
                })
            })
            .collect(),
    )
}

fn members_schema(min_items: u64) -> Value {
    let archetypes: Vec<&str> = Archetype::ALL.iter().map(|a| a.slug()).collect();
    let roles: Vec<&str> = Role::ALL.iter().map(|r| r.slug()).collect();
    json!({
        "type": "object",
        "required": ["members"],
        "properties": {
            "members": {
                "type": "array",
                "minItems": min_items,
                "items": {
                    "type": "object",
                    "required": ["name", "archetype", "role"],
                    "properties": {
                        "id": {"type": "string"},
                        "name": {"type": "string"},
                        "archetype": {"type": "string", "enum": archetypes},
                        "role": {"type": "string", "enum": roles}
                    }
                }
            }
        }
    })
}

fn tool_result(id: Value, text: String, payload: Value) -> JsonRpcResponse {
    JsonRpcResponse::success(
        id,
        json!({
            "content": [{"type": "text", "text": text}],
            "structuredContent": payload,
        }),
    )
}

fn write_line_response(out: &mut impl Write, response: &JsonRpcResponse) -> io::Result<()> {
    let body = serde_json::to_string(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    out.write_all(body.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}

fn read_http_post_body(stream: &TcpStream) -> io::Result<Option<Vec<u8>>> {
    let mut reader = io::BufReader::new(stream);
    let mut request_line = String::new();
    if reader.read_line(&mut request_line)? == 0 {
        return Ok(None);
    }
    let is_post = request_line.trim_start().starts_with("POST");

    let mut content_length = 0_usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            break;
        }
        let header = header.trim();
        if header.is_empty() {
            break;
        }
        if let Some(value) = header.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    if !is_post {
        return Ok(None);
    }

    let mut body = vec![0_u8; content_length];
    reader.read_exact(&mut body)?;
    Ok(Some(body))
}

fn write_http_response(stream: &mut TcpStream, status: &str, body: &str) -> io::Result<()> {
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes())
}
