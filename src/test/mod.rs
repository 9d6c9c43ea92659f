mod chain;
mod config;
mod packet;
mod queues;
