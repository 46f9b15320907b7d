mod audio;
mod openai_chat_client_test;
