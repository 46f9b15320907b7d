mod audio_decoder_test;
