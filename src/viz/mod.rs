//! 可视化事件记录（用于离线回放）
//!
//! 设计目标：
//! - **结构化**：状态机每次转换产生一条 JSON 事件，而不是解析文本日志
//! - **轻量**：只存内存，由调用方决定何时写文件
//! - **可回放**：事件携带转换后的完整阶段/步骤，渲染层可直接逐条重放

mod types;

pub use types::{VizEvent, VizEventKind, VizLogger};
