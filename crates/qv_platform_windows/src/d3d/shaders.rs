//! 顶点/像素着色器字节码
//!
//! 优先读取配置目录下预编译的 `quad_vs.cso` / `quad_ps.cso`，
//! 未配置目录时在启动时编译内嵌的 HLSL。

use std::fs;
use std::path::Path;

use qv_core::{GraphicsError, GraphicsResult};
use windows::Win32::Graphics::Direct3D::Fxc::*;
use windows::Win32::Graphics::Direct3D::ID3DBlob;
use windows::core::{PCSTR, s};

pub const VERTEX_SHADER_FILE: &str = "quad_vs.cso";
pub const PIXEL_SHADER_FILE: &str = "quad_ps.cso";

const EMBEDDED_SOURCE: &str = include_str!("../../shaders/quad.hlsl");

// Shader model 4.0 runs on every accepted feature level (10.0 and up).
const VERTEX_TARGET: PCSTR = s!("vs_4_0");
const PIXEL_TARGET: PCSTR = s!("ps_4_0");

#[derive(Debug, Clone)]
pub struct ShaderBytecode {
    pub vertex: Vec<u8>,
    pub pixel: Vec<u8>,
}

impl ShaderBytecode {
    pub fn load(shader_dir: Option<&Path>) -> GraphicsResult<Self> {
        match shader_dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::compile_embedded(),
        }
    }

    pub fn from_dir(dir: &Path) -> GraphicsResult<Self> {
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read(&path).map_err(|e| {
                GraphicsError::ResourceCreation(format!("{}: {e}", path.display()))
            })
        };

        let shaders = Self {
            vertex: read(VERTEX_SHADER_FILE)?,
            pixel: read(PIXEL_SHADER_FILE)?,
        };
        log::info!("Loaded precompiled shaders from {}", dir.display());
        Ok(shaders)
    }

    pub fn compile_embedded() -> GraphicsResult<Self> {
        Ok(Self {
            vertex: compile(EMBEDDED_SOURCE, s!("VS"), VERTEX_TARGET)?,
            pixel: compile(EMBEDDED_SOURCE, s!("PS"), PIXEL_TARGET)?,
        })
    }
}

fn compile(source: &str, entry: PCSTR, target: PCSTR) -> GraphicsResult<Vec<u8>> {
    let mut flags = D3DCOMPILE_ENABLE_STRICTNESS;
    if cfg!(debug_assertions) {
        flags |= D3DCOMPILE_DEBUG;
    }

    let mut code: Option<ID3DBlob> = None;
    let mut errors: Option<ID3DBlob> = None;
    let result = unsafe {
        D3DCompile(
            source.as_ptr().cast(),
            source.len(),
            s!("quad.hlsl"),
            None,
            None,
            entry,
            target,
            flags,
            0,
            &mut code,
            Some(&mut errors),
        )
    };

    let entry_name = unsafe { entry.to_string() }.unwrap_or_default();
    if let Err(e) = result {
        let details = errors
            .as_ref()
            .map(|blob| String::from_utf8_lossy(blob_bytes(blob)).trim_end().to_string())
            .unwrap_or_else(|| e.to_string());
        return Err(GraphicsError::ResourceCreation(format!(
            "shader {entry_name}: {details}"
        )));
    }

    let code = code.ok_or_else(|| {
        GraphicsError::ResourceCreation(format!("shader {entry_name}: no bytecode"))
    })?;
    Ok(blob_bytes(&code).to_vec())
}

fn blob_bytes(blob: &ID3DBlob) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(blob.GetBufferPointer().cast::<u8>(), blob.GetBufferSize())
    }
}
