//! 仿真核心模块
//!
//! 此模块包含仿真配置、阶段/步骤寻址，以及驱动握手、发送、接收导航的状态机。

// 子模块声明
mod config;
mod machine;
mod phase;

// 重新导出公共接口
pub use config::{
    ConnectionType, DEFAULT_MESSAGE, DEFAULT_SOURCE_PORT, EPHEMERAL_PORT_BASE, Medium, Protocol,
    SimulationConfig, Speed,
};
pub use machine::Simulation;
pub use phase::{
    COMPLETE_STEP, Direction, FIRST_LAYER_STEP, HandshakeSegment, LAST_HANDSHAKE_STEP,
    LAST_LAYER_STEP, Phase, Side, record_index,
};
