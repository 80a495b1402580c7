mod addr;
mod pipeline;
