use serde_json::{json, Value};

pub const AVAILABLE_ENDPOINTS: &[&str] = &[
    "GET /health",
    "GET /docs",
    "POST /generate/portrait",
    "POST /generate/faceswap",
];

pub fn api_docs() -> Value {
    json!({
        "title": "AI Bridal Portrait Generator API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Relay for generating bridal portraits and face swaps using AI providers.",
        "endpoints": {
            "POST /generate/portrait": {
                "description": "Generate a bridal portrait using Google Gemini",
                "aliases": ["POST /api/generate/gemini"],
                "contentType": "multipart/form-data",
                "parameters": {
                    "userImage": { "type": "file", "required": true, "description": "The input photo to transform" }
                },
                "responses": {
                    "200": { "description": "Success - returns generated image as base64 data URL" },
                    "400": { "description": "Bad request - missing or invalid parameters, or a malformed upload" },
                    "500": { "description": "Internal server error" }
                }
            },
            "POST /generate/faceswap": {
                "description": "Perform face swap using Segmind",
                "aliases": ["POST /api/generate/segmind"],
                "contentType": "multipart/form-data",
                "parameters": {
                    "sourceImage": { "type": "file", "required": true, "description": "The source face image" },
                    "targetImage": { "type": "file", "required": true, "description": "The target body/background image" }
                },
                "headers": {
                    "X-Segmind-API-Key": {
                        "required": true,
                        "description": "Segmind API key for the service. Optional when the relay is started with SEGMIND_API_KEY."
                    }
                },
                "responses": {
                    "200": { "description": "Success - returns face-swapped image as base64 data URL" },
                    "400": { "description": "Bad request - missing or invalid parameters" },
                    "401": { "description": "Unauthorized - missing or invalid API key" },
                    "500": { "description": "Internal server error" }
                }
            },
            "GET /health": { "description": "Liveness check" },
            "GET /docs": { "description": "This document", "aliases": ["GET /api/docs"] }
        },
        "examples": {
            "curl_portrait": "curl -X POST http://localhost:3001/generate/portrait -F \"userImage=@/path/to/your/photo.jpg\"",
            "curl_faceswap": "curl -X POST http://localhost:3001/generate/faceswap -H \"X-Segmind-API-Key: YOUR_SEGMIND_API_KEY\" -F \"sourceImage=@/path/to/source.jpg\" -F \"targetImage=@/path/to/target.jpg\""
        }
    })
}
